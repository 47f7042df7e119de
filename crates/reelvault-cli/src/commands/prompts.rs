use color_eyre::Result;
use dialoguer::Input;

/// Prompt for a string value with optional default
pub fn prompt_string(prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input_builder = Input::<String>::new().with_prompt(prompt).allow_empty(true);

    if let Some(default_value) = default {
        input_builder = input_builder.default(default_value.to_string());
    }

    input_builder
        .interact()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))
}

/// Prompt for a rating threshold between 0 and 10
pub fn prompt_threshold(prompt: &str, default: f32) -> Result<f32> {
    loop {
        let input_str = Input::<String>::new()
            .with_prompt(prompt)
            .default(format!("{:.1}", default))
            .interact()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read input: {}", e))?;

        match input_str.trim().parse::<f32>() {
            Ok(value) if (0.0..=10.0).contains(&value) => return Ok(value),
            _ => {
                eprintln!("Invalid input. Please enter a number between 0 and 10.");
                continue;
            }
        }
    }
}
