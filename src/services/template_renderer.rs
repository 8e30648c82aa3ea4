use std::collections::HashMap;

/// Substitutes `{{ name }}` placeholders. Unknown names stay in the output
/// untouched so a typo is visible in the rendered document.
pub struct TemplateRenderer {
    values: HashMap<String, String>,
}

impl TemplateRenderer {
    pub fn new() -> Self {
        Self { values: HashMap::new() }
    }

    pub fn set(&mut self, name: &str, value: impl ToString) -> &mut Self {
        self.values.insert(name.to_string(), value.to_string());
        self
    }

    pub fn render(&self, template: &str) -> String {
        let mut output = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            output.push_str(&rest[..start]);
            let after_open = &rest[start + 2..];

            let Some(end) = after_open.find("}}") else {
                output.push_str(&rest[start..]);
                return output;
            };

            let name = after_open[..end].trim();
            match self.values.get(name) {
                Some(value) => output.push_str(value),
                None => {
                    log::warn!("⚠️ Unknown template placeholder '{}'", name);
                    output.push_str(&rest[start..start + 2 + end + 2]);
                }
            }
            rest = &after_open[end + 2..];
        }

        output.push_str(rest);
        output
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
