pub mod critical_rule_hit;
pub mod quality_gate_report;
