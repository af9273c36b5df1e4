use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

/// Placeholder values for one assignment's question templates.
pub type Params = HashMap<&'static str, String>;

fn pick<R: Rng, T: ToString>(rng: &mut R, choices: &[T]) -> String {
    choices
        .choose(rng)
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Draw random design parameters for a topic. Unknown topics get none.
pub fn generate<R: Rng>(topic: &str, rng: &mut R) -> Params {
    let mut p = Params::new();
    match topic {
        "floorplanning" => {
            p.insert("size", pick(rng, &["10mm x 10mm", "15mm x 12mm", "8mm x 16mm"]));
            p.insert("num_macros", rng.gen_range(5..=20).to_string());
            p.insert("aspect_ratio", pick(rng, &["1:1", "2:1", "1.5:1", "3:2"]));
            p.insert("utilization", rng.gen_range(70..=85).to_string());
            p.insert("power_domains", rng.gen_range(2..=6).to_string());
            p.insert("timing_constraint", pick(rng, &["500MHz", "1GHz", "2GHz"]));
            p.insert("design_type", pick(rng, &["CPU", "GPU", "DSP", "mixed-signal"]));
            p.insert("voltage_domains", rng.gen_range(2..=4).to_string());
            p.insert("package_type", pick(rng, &["BGA", "QFP", "CSP"]));
            p.insert("design_size", pick(rng, &["large", "medium", "complex"]));
        }
        "placement" => {
            p.insert("frequency", rng.gen_range(500..=2000).to_string());
            p.insert("utilization", rng.gen_range(75..=90).to_string());
            p.insert("num_layers", rng.gen_range(6..=12).to_string());
            p.insert("design_complexity", pick(rng, &["simple", "moderate", "complex"]));
            p.insert("violation_type", pick(rng, &["setup", "hold", "max_transition"]));
            p.insert("clock_domains", rng.gen_range(2..=8).to_string());
            p.insert("skew_budget", rng.gen_range(20..=100).to_string());
            p.insert("leakage_target", rng.gen_range(10..=30).to_string());
            p.insert("timing_corners", rng.gen_range(3..=9).to_string());
            p.insert("technology_node", pick(rng, &["7nm", "5nm", "3nm"]));
        }
        "routing" => {
            p.insert("drc_violations", rng.gen_range(100..=5000).to_string());
            p.insert("technology_node", pick(rng, &["7nm", "5nm", "3nm"]));
            p.insert("congestion_level", pick(rng, &["low", "moderate", "high"]));
            p.insert("layers", rng.gen_range(8..=15).to_string());
            p.insert("differential_pairs", rng.gen_range(10..=50).to_string());
            p.insert("impedance_target", pick(rng, &[50, 75, 90, 100]));
            p.insert("current_density", pick(rng, &["1.5", "2.0", "2.5"]));
            p.insert("skew_target", rng.gen_range(20..=50).to_string());
            p.insert("frequency", pick(rng, &[1, 2, 5, 10]));
        }
        "timing" => {
            p.insert("violation_amount", rng.gen_range(10..=200).to_string());
            p.insert("num_paths", rng.gen_range(20..=500).to_string());
            p.insert("skew", rng.gen_range(20..=100).to_string());
            p.insert("clock_domains", rng.gen_range(2..=8).to_string());
            p.insert("corner", pick(rng, &["slow", "fast", "typical"]));
            p.insert("hold_violations", rng.gen_range(50..=1000).to_string());
            p.insert("interface_speed", pick(rng, &["1", "2.5", "5", "10", "25"]));
        }
        "power" => {
            p.insert("ir_drop", rng.gen_range(50..=200).to_string());
            p.insert("power_consumption", rng.gen_range(500..=2000).to_string());
            p.insert("voltage_levels", rng.gen_range(2..=5).to_string());
            p.insert("clock_power", rng.gen_range(15..=40).to_string());
        }
        _ => {}
    }
    p
}

/// Substitute `{name}` placeholders from `params`.
///
/// If any placeholder has no value the template is returned unchanged, so a
/// question never shows a half-filled sentence.
pub fn fill_template(template: &str, params: &Params) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        let key = &rest[open + 1..open + close];
        match params.get(key) {
            Some(value) => {
                out.push_str(&rest[..open]);
                out.push_str(value);
                rest = &rest[open + close + 1..];
            }
            None => return template.to_string(),
        }
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::generator::topics::TOPICS;

    #[test]
    fn test_fill_template_substitutes_all() {
        let mut params = Params::new();
        params.insert("layers", "12".into());
        params.insert("node", "5nm".into());
        assert_eq!(
            fill_template("Use {layers} layers at {node}.", &params),
            "Use 12 layers at 5nm."
        );
    }

    #[test]
    fn test_fill_template_missing_key_keeps_template() {
        let mut params = Params::new();
        params.insert("layers", "12".into());
        let template = "Use {layers} layers at {node}.";
        assert_eq!(fill_template(template, &params), template);
    }

    #[test]
    fn test_fill_template_without_placeholders() {
        assert_eq!(fill_template("Plain question?", &Params::new()), "Plain question?");
    }

    #[test]
    fn test_every_template_placeholder_is_generated() {
        let mut rng = StdRng::seed_from_u64(7);
        for topic in TOPICS {
            let params = generate(topic.name, &mut rng);
            for template in topic.templates {
                let filled = fill_template(template, &params);
                assert!(!filled.contains('{'), "unfilled: {}", filled);
            }
        }
    }

    #[test]
    fn test_generated_values_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let params = generate("floorplanning", &mut rng);
            let macros: u32 = params["num_macros"].parse().unwrap();
            assert!((5..=20).contains(&macros));
            let util: u32 = params["utilization"].parse().unwrap();
            assert!((70..=85).contains(&util));
        }
    }

    #[test]
    fn test_unknown_topic_has_no_params() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate("analog", &mut rng).is_empty());
    }
}
