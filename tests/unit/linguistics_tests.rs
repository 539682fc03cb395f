/*!
 * Tests for token annotation
 */

use subnorm::linguistics::{GrammaticalRole, LinguisticAnalyzer, RuleBasedAnalyzer, Token};
use crate::common::{self, FixedTableAnalyzer};

#[test]
fn test_rule_based_analyze_withScenarioText_shouldKeepUnitsWhole() {
    let tokens = RuleBasedAnalyzer::new().analyze(common::SCENARIO_A_TEXT).unwrap();
    let surfaces: Vec<&str> = tokens.iter().map(|t| t.surface.as_str()).collect();

    assert_eq!(surfaces, common::SCENARIO_A_TEXT.split_whitespace().collect::<Vec<_>>());
    assert!(tokens[1].is_contraction);
    assert!(tokens[3].is_contraction);
    assert!(tokens[5].is_hyphen_compound);
    assert_eq!(tokens[6].role, GrammaticalRole::CoordinatingConjunction);
    assert!(tokens.last().unwrap().sentence_boundary);
}

#[test]
fn test_rule_based_analyze_withRepeatedCalls_shouldBeDeterministic() {
    let analyzer = RuleBasedAnalyzer::new();
    let text = "Wait, because the door - it's open.";

    assert_eq!(analyzer.analyze(text).unwrap(), analyzer.analyze(text).unwrap());
    assert_eq!(analyzer.name(), "rule-based");
}

#[test]
fn test_token_ends_clause_withTrailingQuote_shouldLookPastIt() {
    assert!(Token::word("said,\"").ends_clause());
    assert!(Token::word("wait;").ends_clause());
    assert!(!Token::word("done.").ends_clause());
}

#[test]
fn test_token_is_lexical_unit_withFlags_shouldReflectThem() {
    assert!(Token::word("can't").contraction().is_lexical_unit());
    assert!(Token::word("well-known").hyphen_compound().is_lexical_unit());
    assert!(!Token::word("plain").is_lexical_unit());
}

#[test]
fn test_fixed_table_analyze_withRegisteredText_shouldReturnTable() {
    let analyzer = FixedTableAnalyzer::new().with_entry(common::SCENARIO_A_TEXT, common::scenario_a_tokens());

    let tokens = analyzer.analyze(common::SCENARIO_A_TEXT).unwrap();

    assert_eq!(tokens.len(), 16);
    assert_eq!(tokens[2].surface, "n't");
}

#[test]
fn test_fixed_table_analyze_withDroppedWord_shouldLoseIt() {
    let analyzer = FixedTableAnalyzer::new().dropping("need");

    let tokens = analyzer.analyze("we need to go").unwrap();

    assert_eq!(tokens.len(), 3);
    assert!(tokens.iter().all(|t| t.surface != "need"));
}
