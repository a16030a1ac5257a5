//! Documentation generation from parameter contracts
//!
//! Renders a module's contract as Markdown: synopsis, options table,
//! example invocations, and return-value samples. Pure function over the
//! contract data; nothing here touches the filesystem.

use serde_json::Value;

use crate::spec::ModuleSpec;

/// Render a module's documentation as Markdown
pub fn render_markdown(name: &str, spec: &ModuleSpec) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {name}\n\n"));
    for line in &spec.description {
        out.push_str(line);
        out.push('\n');
    }

    out.push_str("\n## Options\n\n");
    out.push_str("| Name | Type | Required | Default | Choices | Description |\n");
    out.push_str("|------|------|----------|---------|---------|-------------|\n");
    for field in &spec.fields {
        let default = field
            .default
            .as_ref()
            .map(Value::to_string)
            .unwrap_or_else(|| "-".to_string());
        let choices = if field.choices.is_empty() {
            "-".to_string()
        } else {
            field.choices.join(", ")
        };
        out.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            field.name,
            field.field_type.name(),
            if field.required { "yes" } else { "no" },
            default,
            choices,
            field.description
        ));
    }

    if !spec.examples.is_empty() {
        out.push_str("\n## Examples\n");
        for example in &spec.examples {
            out.push_str("\n```json\n");
            out.push_str(example.trim());
            out.push_str("\n```\n");
        }
    }

    if !spec.returns.is_empty() {
        out.push_str("\n## Return Values\n");
        for ret in &spec.returns {
            out.push_str(&format!(
                "\n### {} ({})\n\n{}\n",
                ret.name,
                ret.field_type.name(),
                ret.description
            ));
            for sample in &ret.samples {
                out.push_str("\n```json\n");
                out.push_str(sample.trim());
                out.push_str("\n```\n");
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{FieldSpec, FieldType, ReturnSpec};
    use serde_json::json;

    fn sample_spec() -> ModuleSpec {
        ModuleSpec::new(&["Manage a thing."])
            .field(
                FieldSpec::new("state", FieldType::String, "The state.")
                    .required()
                    .choices(&["present", "absent"]),
            )
            .field(FieldSpec::new("mode", FieldType::String, "The mode.").default(json!("644")))
            .examples(&[r#"{"state": "present"}"#])
            .returns(
                ReturnSpec::new("thing", FieldType::Dict, "The resulting thing.")
                    .samples(&[r#"{"thing": {"size": 1}}"#]),
            )
    }

    #[test]
    fn markdown_includes_options_table() {
        let doc = render_markdown("thing", &sample_spec());

        assert!(doc.starts_with("# thing\n"));
        assert!(doc.contains("| state | string | yes | - | present, absent | The state. |"));
        assert!(doc.contains("| mode | string | no | \"644\" | - | The mode. |"));
    }

    #[test]
    fn markdown_includes_examples_and_returns() {
        let doc = render_markdown("thing", &sample_spec());

        assert!(doc.contains("## Examples"));
        assert!(doc.contains(r#"{"state": "present"}"#));
        assert!(doc.contains("### thing (dict)"));
        assert!(doc.contains(r#"{"thing": {"size": 1}}"#));
    }

    #[test]
    fn markdown_skips_empty_sections() {
        let spec = ModuleSpec::new(&["Bare."]);
        let doc = render_markdown("bare", &spec);

        assert!(!doc.contains("## Examples"));
        assert!(!doc.contains("## Return Values"));
    }
}
