use bb84_sim::ai::analysis::{parse_answer, EveAnalysis};
use bb84_sim::ai::AiProvider;
use bb84_sim::commands::simulate::{handle, Bb84Request, Bb84Response};
use bb84_sim::commands::sweep::sweep;
use bb84_sim::config::Settings;
use bb84_sim::qkd::{Basis, Bit, RngSource, ScriptedSource, Strategy};

struct Flaky;
impl AiProvider for Flaky {
    fn name(&self) -> &'static str { "flaky" }
    fn chat(&self, _prompt: &str) -> anyhow::Result<String> {
        anyhow::bail!("503 Service Unavailable")
    }
}

struct Sees(std::sync::Mutex<String>);
impl AiProvider for Sees {
    fn name(&self) -> &'static str { "sees" }
    fn chat(&self, prompt: &str) -> anyhow::Result<String> {
        *self.0.lock().unwrap() = prompt.to_string();
        Ok("Answer=Expert | mirrors Alice".to_string())
    }
}

#[test]
fn record_serializes_with_wire_names() {
    use Basis::{Diagonal as X, Rectilinear as P};
    use Bit::{One, Zero};

    let mut rng = ScriptedSource::new()
        .with_bits([One, Zero, One, One, One, Zero, Zero, One])
        .with_bases([P, X, P, X, P, P, X, X]);
    let req = Bb84Request {
        num_bits: Some(4),
        eve_strategy: Some("beginner".into()),
        use_mock: Some(true),
    };
    let resp = handle(&req, &Settings::default(), &mut rng, None).unwrap();
    let json = serde_json::to_string(&resp.record).unwrap();
    insta::assert_snapshot!(json, @r#"{"alice_bits":[1,0,1,1],"alice_bases":["+","x","+","x"],"eve_bases":["+","+","+","+"],"bob_bases":["+","+","x","x"],"bob_bits":[1,0,1,0],"error_positions":[3],"error_rate":50.0,"is_secure":false,"matching_indices":[0,3]}"#);
    assert_eq!(resp.match_rate, 50.0);
}

#[test]
fn response_round_trips_through_json() {
    let resp = handle(&Bb84Request::default(), &Settings::default(), &mut RngSource::seeded(8), None).unwrap();
    let text = serde_json::to_string(&resp).unwrap();
    let back: Bb84Response = serde_json::from_str(&text).unwrap();
    assert_eq!(back, resp);
}

#[test]
fn model_outage_keeps_simulation_result() {
    let req = Bb84Request { num_bits: Some(32), use_mock: Some(false), ..Bb84Request::default() };
    let resp = handle(&req, &Settings::default(), &mut RngSource::seeded(4), Some(&Flaky)).unwrap();
    assert_eq!(resp.record.len(), 32);
    assert_eq!(
        resp.eve_analysis,
        EveAnalysis::unknown("Model error: 503 Service Unavailable")
    );
}

#[test]
fn live_prompt_includes_bases_and_match_rate() {
    let seen = Sees(std::sync::Mutex::new(String::new()));
    let req = Bb84Request {
        num_bits: Some(6),
        eve_strategy: Some("beginner".into()),
        use_mock: Some(false),
    };
    let resp = handle(&req, &Settings::default(), &mut RngSource::seeded(6), Some(&seen)).unwrap();
    assert_eq!(resp.eve_analysis.strategy_guess, "Expert");

    let prompt = seen.0.lock().unwrap().clone();
    assert!(prompt.contains("- Eve bases: + + + + + +"));
    assert!(prompt.contains(&format!("- Match rate: {}%", resp.match_rate)));
}

#[test]
fn unknown_strategy_runs_like_random_eavesdropper() {
    let req = Bb84Request { eve_strategy: Some("quantum-ninja".into()), num_bits: Some(50), ..Bb84Request::default() };
    let a = handle(&req, &Settings::default(), &mut RngSource::seeded(12), None).unwrap();
    let req = Bb84Request { eve_strategy: Some("intermediate".into()), ..req };
    let b = handle(&req, &Settings::default(), &mut RngSource::seeded(12), None).unwrap();
    assert_eq!(a.record, b.record);
}

#[test]
fn oversized_requests_are_rejected() {
    let settings = Settings { max_num_bits: 64, ..Settings::default() };
    let req = Bb84Request { num_bits: Some(65), ..Bb84Request::default() };
    assert!(handle(&req, &settings, &mut RngSource::seeded(1), None).is_err());
}

#[test]
fn expert_is_harder_to_detect_than_intermediate() {
    let expert = sweep(64, Strategy::Expert, 200, &mut RngSource::seeded(31)).unwrap();
    let inter = sweep(64, Strategy::Intermediate, 200, &mut RngSource::seeded(31)).unwrap();
    assert!(expert.mean_error_rate < inter.mean_error_rate);
    assert!(expert.mean_match_rate > inter.mean_match_rate);
}

#[test]
fn parse_answer_keeps_only_first_segment() {
    let a = parse_answer("Answer=Intermediate | random | extra");
    assert_eq!(a.strategy_guess, "Intermediate");
    assert_eq!(a.justification, "random");
}
