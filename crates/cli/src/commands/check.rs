use colored::*;
use core_model::{Model, Section};

pub fn run(file_path: &str) -> anyhow::Result<()> {
    println!("{} {}", "Checking model:".bold(), file_path);

    let model = super::load(file_path)?;
    model.log_model();
    model.log_policy();
    print!("{}", render(&model));

    println!();
    println!("{} Model is valid!", "✓".green().bold());
    Ok(())
}

/// Sections, assertions, tokens and storage modes, one item per line
pub fn render(model: &Model) -> String {
    let mut out = String::new();
    for (section, assertions) in model.sections() {
        out.push_str(&format!("  {} [{}]\n", "✓".green(), section.name()));
        for (key, assertion) in assertions {
            out.push_str(&format!("      {} = {}\n", key, assertion.value));
            if section.has_tokens() {
                out.push_str(&format!("        tokens: {}\n", assertion.tokens.join(", ")));
            }
            if let Some(mode) = assertion.storage_mode() {
                out.push_str(&format!("        storage: {:?}\n", mode));
            }
        }
    }

    if !model.has_section(Section::G) {
        out.push_str(&format!("  {} no role definitions\n", "·".dimmed()));
    }
    out
}
