use log::warn;
use serde::Deserialize;

const STEPS_JSON: &str = include_str!("../assets/steps.json");

#[derive(Deserialize, Clone, PartialEq, Debug)]
pub struct StepDetail {
    pub kicker: String,
    pub title: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

/// Steps of the "how we work" section, in display order.
pub fn steps() -> Vec<StepDetail> {
    parse_steps(STEPS_JSON)
}

fn parse_steps(raw: &str) -> Vec<StepDetail> {
    match serde_json::from_str::<Vec<StepDetail>>(raw) {
        Ok(steps) => steps,
        Err(e) => {
            // The rail copes with zero steps, so render an empty section
            warn!("Failed to parse step content: {}", e);
            Vec::new()
        }
    }
}
