//! End-to-end tests for the addNumber handler
//!
//! Tests assert on the exact JSON text a host receives, since that string is
//! the handler's whole contract.

use nyan_handler::config::{HandlerConfig, NumberPolicy};
use nyan_handler::envelope::ResultEnvelope;
use nyan_handler::handlers::add_number::INVALID_INPUT_MESSAGE;
use nyan_handler::handlers::{AddNumberHandler, Handler};
use nyan_handler::host::{LocalHost, NoHost};
use nyan_handler::params::ParameterBag;
use nyan_handler::testing::{HostCall, MockHost};
use proptest::prelude::*;
use serde_json::{json, Value};

const FAILURE_JSON: &str = r#"{"success":false,"status":500,"error":{"message":"addNumber is a required field and must be numeric."}}"#;

fn run(params: Value) -> String {
    let bag = ParameterBag::try_from(params).unwrap();
    AddNumberHandler::new().handle(&bag, &NoHost)
}

#[test]
fn test_integer_string_adds_two() {
    assert_eq!(
        run(json!({"addNumber": "3"})),
        r#"{"success":true,"status":200,"data":{"result":5}}"#
    );
}

#[test]
fn test_decimal_string_adds_two() {
    assert_eq!(
        run(json!({"addNumber": "2.5"})),
        r#"{"success":true,"status":200,"data":{"result":4.5}}"#
    );
}

#[test]
fn test_leading_zeros_are_accepted() {
    assert_eq!(
        run(json!({"addNumber": "007"})),
        r#"{"success":true,"status":200,"data":{"result":9}}"#
    );
}

#[test]
fn test_large_integer_sum_is_written_without_exponent() {
    assert_eq!(
        run(json!({"addNumber": "9999999999999998"})),
        r#"{"success":true,"status":200,"data":{"result":10000000000000000}}"#
    );
    assert_eq!(
        run(json!({"addNumber": "12345678901234567890"})),
        r#"{"success":true,"status":200,"data":{"result":12345678901234567000}}"#
    );
}

#[test]
fn test_negative_number_is_rejected() {
    assert_eq!(run(json!({"addNumber": "-1"})), FAILURE_JSON);
}

#[test]
fn test_missing_parameter_is_rejected() {
    assert_eq!(run(json!({})), FAILURE_JSON);
    assert_eq!(run(json!({"addNumber": null})), FAILURE_JSON);
    assert_eq!(run(json!({"other": "3"})), FAILURE_JSON);
}

#[test]
fn test_malformed_strings_are_rejected() {
    for bad in ["abc", "1.2.3", "-5", "1e10", " 3", "3 ", "", ".", "1.", ".5", "+1", "0x10"] {
        assert_eq!(
            run(json!({ "addNumber": bad })),
            FAILURE_JSON,
            "input {bad:?} should be rejected"
        );
    }
}

#[test]
fn test_non_string_values_are_rejected_by_default() {
    for bad in [json!(3), json!(2.5), json!(true), json!(["3"]), json!({"v": "3"})] {
        assert_eq!(run(json!({ "addNumber": bad.clone() })), FAILURE_JSON, "input {bad}");
    }
}

#[test]
fn test_allow_native_policy_from_config() {
    let config =
        HandlerConfig::from_toml_str("[handler]\nnumber_policy = \"allow_native\"\n").unwrap();
    let handler = AddNumberHandler::from_config(&config);
    assert_eq!(handler.number_policy(), NumberPolicy::AllowNative);

    let bag = ParameterBag::try_from(json!({"addNumber": 3})).unwrap();
    assert_eq!(
        handler.handle(&bag, &NoHost),
        r#"{"success":true,"status":200,"data":{"result":5}}"#
    );

    let bag = ParameterBag::try_from(json!({"addNumber": -3})).unwrap();
    assert_eq!(handler.handle(&bag, &NoHost), FAILURE_JSON);
}

#[test]
fn test_extra_parameters_are_ignored() {
    assert_eq!(
        run(json!({"addNumber": "1", "unused": "x", "another": 42})),
        r#"{"success":true,"status":200,"data":{"result":3}}"#
    );
}

#[test]
fn test_handle_is_idempotent() {
    let bag = ParameterBag::try_from(json!({"addNumber": "12.75"})).unwrap();
    let handler = AddNumberHandler::new();
    let first = handler.handle(&bag, &NoHost);
    let second = handler.handle(&bag, &NoHost);
    assert_eq!(first, second);
}

#[test]
fn test_result_does_not_depend_on_host() {
    let bag = ParameterBag::try_from(json!({"addNumber": "40"})).unwrap();
    let handler = AddNumberHandler::new();

    let mock = MockHost::new().with_client_ip("192.0.2.1");
    let local = LocalHost::new(".");

    let expected = handler.handle(&bag, &NoHost);
    assert_eq!(handler.handle(&bag, &mock), expected);
    assert_eq!(handler.handle(&bag, &local), expected);
    assert_eq!(
        handler.handle(&bag, &MockHost::with_failure()),
        expected
    );
}

#[test]
fn test_handler_only_introspects_host() {
    let bag = ParameterBag::try_from(json!({"addNumber": "1"})).unwrap();
    let mock = MockHost::new();
    AddNumberHandler::new().handle(&bag, &mock);

    let calls = mock.get_calls();
    assert!(calls
        .iter()
        .all(|c| matches!(c, HostCall::Capabilities | HostCall::GetClientIp)));
}

#[test]
fn test_output_decodes_to_exactly_one_group() {
    let ok: ResultEnvelope = serde_json::from_str(&run(json!({"addNumber": "3"}))).unwrap();
    assert_eq!(ok.result(), Some(5.0));
    assert_eq!(ok.error_message(), None);

    let err: ResultEnvelope = serde_json::from_str(&run(json!({}))).unwrap();
    assert_eq!(err.result(), None);
    assert_eq!(err.error_message(), Some(INVALID_INPUT_MESSAGE));
}

#[test]
fn test_concurrent_invocations_share_no_state() {
    let handler = AddNumberHandler::new();
    std::thread::scope(|scope| {
        let workers: Vec<_> = (0..8)
            .map(|i| {
                let handler = &handler;
                scope.spawn(move || {
                    let bag =
                        ParameterBag::try_from(json!({"addNumber": i.to_string()})).unwrap();
                    (i, handler.handle(&bag, &NoHost))
                })
            })
            .collect();

        for worker in workers {
            let (i, output) = worker.join().unwrap();
            let envelope: ResultEnvelope = serde_json::from_str(&output).unwrap();
            assert_eq!(envelope.result(), Some(f64::from(i) + 2.0));
        }
    });
}

proptest! {
    #[test]
    fn decimal_strings_produce_two_plus_value(s in "[0-9]{1,12}(\\.[0-9]{1,8})?") {
        let output = run(json!({ "addNumber": s.clone() }));
        let envelope: ResultEnvelope = serde_json::from_str(&output).unwrap();
        prop_assert!(envelope.is_success());
        prop_assert_eq!(envelope.status(), 200);
        let expected = 2.0 + s.parse::<f64>().unwrap();
        let actual = envelope.result().unwrap();
        prop_assert!((actual - expected).abs() <= f64::EPSILON * expected.abs());
    }

    #[test]
    fn signed_strings_are_rejected(sign in "[+-]", digits in "[0-9]{1,6}") {
        let output = run(json!({ "addNumber": format!("{sign}{digits}") }));
        prop_assert_eq!(output, FAILURE_JSON);
    }
}
