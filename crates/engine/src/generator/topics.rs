/// A topic in the question bank.
pub struct TopicSpec {
    pub name: &'static str,
    /// Inclusive engineer difficulty range this topic is offered at.
    pub difficulty_range: (u8, u8),
    /// Question templates with `{name}` placeholders filled from [`super::params`].
    pub templates: &'static [&'static str],
}

impl TopicSpec {
    pub fn suits(&self, difficulty: u8) -> bool {
        let (min, max) = self.difficulty_range;
        (min..=max).contains(&difficulty)
    }
}

pub const FALLBACK_TOPIC: &str = "floorplanning";

pub const TOPICS: &[TopicSpec] = &[
    TopicSpec {
        name: "floorplanning",
        difficulty_range: (1, 4),
        templates: &[
            "Design a floorplan for a {size} chip with {num_macros} macro blocks. The chip has an aspect ratio of {aspect_ratio} and utilization target of {utilization}%. Discuss your placement strategy.",
            "Given a design with {power_domains} power domains, explain how you would approach floorplanning to minimize power grid IR drop while maintaining {timing_constraint} timing constraints.",
            "Compare different floorplanning approaches for a {design_type} design. Justify your choice considering area, timing, and power trade-offs.",
            "How would you handle floorplanning for a design with {voltage_domains} voltage domains and level shifters?",
            "Explain the impact of package constraints on your floorplanning decisions for a {package_type} package.",
            "Design a hierarchical floorplan for a {design_size} design with multiple hierarchy levels.",
            "How would you optimize floorplan for thermal management in a high-power design?",
            "Describe your approach to floorplanning for DFT considerations with scan chains.",
            "How would you handle floorplanning for mixed-signal designs with analog blocks?",
            "Explain pin assignment strategy for your floorplan considering I/O constraints.",
            "How would you validate your floorplan meets all timing, power, and area requirements?",
            "Describe congestion analysis and mitigation strategies in your floorplan.",
            "How would you handle floorplanning for designs with hard and soft macros?",
            "Explain your methodology for floorplan optimization iterations and convergence criteria.",
            "How would you approach floorplanning for low-power designs with power gating?",
        ],
    },
    TopicSpec {
        name: "placement",
        difficulty_range: (2, 5),
        templates: &[
            "Explain the impact of placement on timing for a design running at {frequency} MHz. Discuss congestion vs timing trade-offs.",
            "Design has {utilization}% utilization and {num_layers} routing layers. Analyze placement strategies to minimize routing congestion.",
            "Compare global placement vs detailed placement algorithms. When would you choose one over the other for a {design_complexity} design?",
            "Given timing violations on {violation_type} paths, propose placement-based solutions without changing the netlist.",
            "How would you handle placement optimization for a design with {clock_domains} clock domains and {skew_budget} ps skew budget?",
            "Describe placement strategies for power optimization considering {leakage_target}% leakage reduction.",
            "How would you approach placement for designs with {timing_corners} timing corners and PVT variations?",
            "Explain placement techniques for minimizing crosstalk in {technology_node} technology.",
            "How would you handle placement of analog blocks in a mixed-signal design with noise constraints?",
            "Describe your approach to placement optimization for routability in congested designs.",
            "How would you handle placement for designs with multiple voltage islands and level shifters?",
            "Explain placement strategies for clock tree synthesis optimization.",
            "How would you approach placement for DFT structures and scan chain optimization?",
            "Describe placement techniques for power grid optimization and IR drop minimization.",
            "How would you validate placement quality and predict routing success?",
        ],
    },
    TopicSpec {
        name: "routing",
        difficulty_range: (2, 5),
        templates: &[
            "Design has {drc_violations} DRC violations after initial routing. Propose a systematic approach to resolve them.",
            "Explain routing challenges in {technology_node} technology. How do you handle double patterning constraints?",
            "Compare different routing algorithms (maze routing, line-search, A*) for a design with {congestion_level} congestion.",
            "Design requires {layers} metal layers for routing. Justify your layer assignment strategy for different net types.",
            "How would you handle routing for {differential_pairs} differential pairs with {impedance_target} ohm impedance?",
            "Describe your approach to power grid routing for {current_density} mA/um current density requirements.",
            "How would you optimize routing for crosstalk reduction in noisy environments?",
            "Explain routing strategies for clock networks with {skew_target} ps skew targets.",
            "How would you handle routing in double patterning technology with coloring constraints?",
            "Describe routing techniques for high-speed signals with {frequency} GHz switching.",
            "How would you approach routing for mixed-signal designs with analog isolation requirements?",
            "Explain routing optimization for manufacturability and yield improvement.",
            "How would you handle routing congestion resolution without timing degradation?",
            "Describe routing strategies for power optimization and electromigration prevention.",
            "How would you validate routing quality and ensure timing closure?",
        ],
    },
    TopicSpec {
        name: "timing",
        difficulty_range: (3, 5),
        templates: &[
            "Setup time violations of {violation_amount} ps on {num_paths} paths. Analyze root causes and propose solutions.",
            "Clock network has {skew} ps skew across {clock_domains} domains. Design optimization strategy.",
            "Multi-corner timing analysis shows violations in {corner} corner. Explain your closure methodology.",
            "Design has {hold_violations} hold violations after CTS. Compare different fixing approaches.",
            "How would you approach timing optimization in multi-voltage designs with level shifters?",
            "Describe your methodology for timing correlation between synthesis and P&R tools.",
            "How would you handle timing closure for high-speed interfaces running at {interface_speed} Gbps?",
            "Explain timing optimization techniques for low-power designs with voltage scaling.",
            "How would you approach timing analysis for on-chip variation and process corners?",
            "Describe timing closure methodology for complex clock domains with generated clocks.",
            "How would you handle timing optimization for memory interfaces with strict setup/hold requirements?",
            "Explain timing analysis for asynchronous clock domain crossings and metastability.",
            "How would you approach timing closure for hierarchical designs with multiple instances?",
            "Describe timing optimization for process variation tolerance and yield improvement.",
            "How would you validate timing sign-off across all operating modes and corners?",
        ],
    },
    TopicSpec {
        name: "power",
        difficulty_range: (3, 5),
        templates: &[
            "Power grid analysis shows {ir_drop} mV IR drop. Propose grid strengthening strategies.",
            "Design has {power_consumption} mW total power. Analyze leakage vs dynamic power optimization techniques.",
            "Multiple voltage domains with {voltage_levels} different voltages. Design level shifter placement strategy.",
            "Clock tree consumes {clock_power}% of total power. Propose optimization techniques.",
            "How would you validate your power optimization results across all operating modes?",
            "Describe power-aware placement and routing methodology for mobile applications.",
            "How would you approach power grid design for reliability and electromigration prevention?",
            "Explain power optimization techniques for always-on domains in IoT designs.",
            "How would you handle power management for designs with dynamic voltage and frequency scaling?",
            "Describe power analysis methodology for workloads with varying activity patterns.",
            "How would you optimize power for AI/ML accelerators with high compute density?",
            "Explain power integrity analysis and validation for high-performance processors.",
            "How would you approach power optimization for automotive designs with safety requirements?",
            "Describe power delivery network design methodology for multi-core processors.",
            "How would you validate power sign-off across temperature and process variations?",
        ],
    },
];

pub fn find(name: &str) -> Option<&'static TopicSpec> {
    TOPICS.iter().find(|t| t.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_topic_has_fifteen_templates() {
        for topic in TOPICS {
            assert_eq!(topic.templates.len(), 15, "{}", topic.name);
        }
    }

    #[test]
    fn test_only_floorplanning_suits_beginners() {
        let suitable: Vec<_> = TOPICS.iter().filter(|t| t.suits(1)).map(|t| t.name).collect();
        assert_eq!(suitable, vec![FALLBACK_TOPIC]);
    }

    #[test]
    fn test_every_difficulty_has_a_topic() {
        for difficulty in 1..=5 {
            assert!(TOPICS.iter().any(|t| t.suits(difficulty)));
        }
    }
}
