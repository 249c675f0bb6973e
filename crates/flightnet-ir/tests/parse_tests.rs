use flightnet_ir::grammar::{CycleGrammar, Segment};
use flightnet_ir::net::PetriNet;
use flightnet_ir::parse::{parse_grammar, parse_net, ParseError};
use flightnet_ir::token::Token;

#[test]
fn test_parse_net_from_file() {
    let json = include_str!("fixtures/small_agency.json");
    let net = parse_net(json).unwrap();
    assert_eq!(net.place_count(), 15);
    assert_eq!(net.transition_count(), 12);
    assert_eq!(net.initial_marking[0], 3);
    // place names are optional in the file
    assert!(net.place_names.is_empty());
    assert_eq!(net.incidence, PetriNet::flight_agency().incidence);
}

#[test]
fn test_parse_invalid_json() {
    let result = parse_net("not json at all");
    assert!(matches!(result, Err(ParseError::Json(_))));
}

#[test]
fn test_parse_ragged_incidence() {
    let json = r#"{
        "incidence": [[-1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1], [1, 0]],
        "initial_marking": [1, 0]
    }"#;
    let result = parse_net(json);
    assert!(matches!(
        result,
        Err(ParseError::RaggedIncidence { row: 1, found: 2, expected: 12 })
    ));
}

#[test]
fn test_parse_wrong_transition_count() {
    let json = r#"{ "incidence": [[-1, 1]], "initial_marking": [1] }"#;
    assert!(matches!(
        parse_net(json),
        Err(ParseError::TransitionCount { found: 2, expected: 12 })
    ));
}

#[test]
fn test_parse_marking_length_mismatch() {
    let json = r#"{
        "incidence": [[-1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]],
        "initial_marking": [1, 2, 3]
    }"#;
    assert!(matches!(
        parse_net(json),
        Err(ParseError::MarkingLength { found: 3, places: 1 })
    ));
}

#[test]
fn test_empty_incidence() {
    let json = r#"{ "incidence": [], "initial_marking": [] }"#;
    assert!(matches!(parse_net(json), Err(ParseError::EmptyIncidence)));
}

#[test]
fn test_grammar_json_roundtrip() {
    let grammar = CycleGrammar::flight_booking();
    let json = serde_json::to_string(&grammar).unwrap();
    let parsed = parse_grammar(&json).unwrap();
    assert_eq!(parsed, grammar);
}

#[test]
fn test_parse_grammar_document() {
    let json = r#"{
        "name": "tiny",
        "segments": [
            { "type": "anchor", "token": "T0" },
            { "type": "choice", "alternatives": [
                { "id": "a", "tokens": ["T2"] },
                { "id": "b", "tokens": ["T3", "T4"] }
            ]},
            { "type": "anchor", "token": "T11" }
        ]
    }"#;
    let grammar = parse_grammar(json).unwrap();
    assert_eq!(grammar.segments.len(), 3);
    assert!(matches!(grammar.segments[0], Segment::Anchor { token } if token == Token::T0));
    assert_eq!(grammar.paths().len(), 2);
}

#[test]
fn test_parse_grammar_rejects_unknown_token() {
    let json = r#"{ "name": "bad", "segments": [{ "type": "anchor", "token": "T12" }] }"#;
    assert!(parse_grammar(json).is_err());
}
