//! Extension points.
//!
//! The host exposes two seams around this feature: output filters that may
//! transform the stylesheet after normalization, and section builders that
//! contribute blocks to the settings screen. Slots are registered once at
//! startup by the composition root and invoked in registration order.

use std::time::SystemTime;

use crate::section::SettingsSection;

/// Transforms the normalized stylesheet right before delivery.
pub type OutputFilter = Box<dyn Fn(String) -> String + Send + Sync>;

/// Contributes one section to the settings screen at render time.
pub type SectionBuilder = Box<dyn Fn(SystemTime) -> SettingsSection + Send + Sync>;

/// Registry of named callback slots.
#[derive(Default)]
pub struct Extensions {
    output_filters: Vec<OutputFilter>,
    section_builders: Vec<SectionBuilder>,
}

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_output_filter(&mut self, filter: OutputFilter) {
        self.output_filters.push(filter);
    }

    pub fn register_section_builder(&mut self, builder: SectionBuilder) {
        self.section_builders.push(builder);
    }

    /// Run the stylesheet through every registered output filter, in
    /// registration order.
    pub fn apply_output_filters(&self, css: String) -> String {
        self.output_filters
            .iter()
            .fold(css, |css, filter| filter(css))
    }

    /// Collect the settings sections contributed by registered builders.
    pub fn build_sections(&self, now: SystemTime) -> Vec<SettingsSection> {
        self.section_builders
            .iter()
            .map(|builder| builder(now))
            .collect()
    }

    pub fn output_filter_count(&self) -> usize {
        self.output_filters.len()
    }

    pub fn section_builder_count(&self) -> usize {
        self.section_builders.len()
    }
}

impl std::fmt::Debug for Extensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extensions")
            .field("output_filters", &self.output_filters.len())
            .field("section_builders", &self.section_builders.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_filters_is_identity() {
        let extensions = Extensions::new();
        assert_eq!(
            extensions.apply_output_filters("body {}".into()),
            "body {}"
        );
    }

    #[test]
    fn filters_run_in_registration_order() {
        let mut extensions = Extensions::new();
        extensions.register_output_filter(Box::new(|css| format!("{css}a")));
        extensions.register_output_filter(Box::new(|css| format!("{css}b")));
        assert_eq!(extensions.apply_output_filters("x".into()), "xab");
    }

    #[test]
    fn build_sections_collects_each_builder() {
        let mut extensions = Extensions::new();
        extensions.register_section_builder(Box::new(|_| SettingsSection {
            id: "one".into(),
            title: "One".into(),
            text: String::new(),
            fields: vec![],
        }));
        extensions.register_section_builder(Box::new(|_| SettingsSection {
            id: "two".into(),
            title: "Two".into(),
            text: String::new(),
            fields: vec![],
        }));

        let sections = extensions.build_sections(SystemTime::UNIX_EPOCH);
        let ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["one", "two"]);
    }
}
