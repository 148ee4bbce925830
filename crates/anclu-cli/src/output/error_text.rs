use anclu_client::ClientError;

pub fn render_error(error: &ClientError) -> String {
    let mut lines = vec![
        "The report could not be produced.".to_string(),
        String::new(),
        format!("  Error:    {}", error.code),
        format!("  Details:  {}", error.message),
    ];

    if let Some(missing) = error
        .data
        .as_ref()
        .and_then(|data| data.get("missing_headers"))
        .and_then(|value| value.as_array())
    {
        let names = missing
            .iter()
            .filter_map(|value| value.as_str())
            .collect::<Vec<&str>>();
        lines.push(format!("  Missing:  {}", names.join(", ")));
    }

    lines.push(String::new());
    lines.push("What to do next:".to_string());
    if error.recovery_steps.is_empty() {
        lines.push("  1. Retry the command.".to_string());
    } else {
        for (index, step) in error.recovery_steps.iter().enumerate() {
            lines.push(format!("  {}. {step}", index + 1));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use anclu_client::ClientError;

    use super::render_error;

    #[test]
    fn renders_standard_error_layout() {
        let error = ClientError::invalid_argument_with_recovery(
            "bad input",
            vec!["run anclu --help".to_string()],
        );

        let rendered = render_error(&error);
        assert!(rendered.starts_with("The report could not be produced."));
        assert!(rendered.contains("  Error:    invalid_argument"));
        assert!(rendered.contains("  Details:  bad input"));
        assert!(rendered.contains("What to do next:"));
        assert!(rendered.contains("  1. run anclu --help"));
        assert!(!rendered.contains("Missing:"));
    }

    #[test]
    fn schema_mismatch_lists_missing_headers() {
        let error = ClientError::dataset_schema_mismatch(
            vec!["fec_registro".to_string(), "Marca".to_string()],
            vec!["Marca".to_string()],
            vec!["fec_registro".to_string()],
        );

        let rendered = render_error(&error);
        assert!(rendered.contains("  Error:    dataset_schema_mismatch"));
        assert!(rendered.contains("  Missing:  Marca"));
    }
}
