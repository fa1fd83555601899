use colored::*;
use core_model::{Model, Section, StorageMode};

pub fn run(file_path: &str) -> anyhow::Result<()> {
    println!("{} {}", "Analyzing model:".bold(), file_path);

    let model = super::load(file_path)?;
    let (mode, report) = analyze(&model);
    print!("{}", report);

    println!();
    match mode {
        StorageMode::Set => println!("{} Rules use set storage", "✓".green().bold()),
        StorageMode::Ordered => println!("{} Rules use ordered storage", "⚠".yellow().bold()),
    }
    Ok(())
}

/// Storage decision for `model` with a printable explanation
pub fn analyze(model: &Model) -> (StorageMode, String) {
    let mut out = String::new();
    if let Some(r) = model.assertion(Section::R, "r") {
        out.push_str(&format!("  Request fields: {}\n", r.tokens.join(", ")));
    }
    if let Some(m) = model.assertion(Section::M, "m") {
        out.push_str(&format!("  Matcher: {}\n", m.value));
    }

    match model.storage_eligibility() {
        Ok(()) => {
            out.push_str(&format!(
                "  {} matcher is an exact match on every request field\n",
                "✓".green()
            ));
        }
        Err(reason) => {
            out.push_str(&format!("  {} set storage not possible: {}\n", "⚠".yellow(), reason));
        }
    }
    (model.preferred_storage_mode(), out)
}
