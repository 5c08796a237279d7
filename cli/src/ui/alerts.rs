use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use engine::Protocol;
use owo_colors::OwoColorize;

pub fn print_timeout_notice(protocol: Protocol) {
    println!(
        "\n  {} {}",
        "⚠".yellow().bold(),
        format!("{protocol} doesn't support timeout parameter, the value is ignored").yellow()
    );
}

pub fn print_config_error(path: &std::path::Path, error: &anyhow::Error) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_width(70);

    table.add_row(vec![
        Cell::new("⚠️  CONFIG ERROR")
            .fg(Color::Red)
            .add_attribute(comfy_table::Attribute::Bold),
    ]);

    let error_chain = error
        .chain()
        .enumerate()
        .map(|(i, cause)| {
            if i == 0 {
                cause.to_string()
            } else {
                format!("  └─ Caused by: {cause}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    let error_text = format!(
        "Failed to load configuration file.\n\n\
         Path: {}\n\
         Error: {error_chain}\n\n\
         A minimal file needs a [gateway] section with api_url.",
        path.display(),
    );

    table.add_row(vec![Cell::new(error_text).fg(Color::White)]);

    println!("\n  {}", "  Configuration Issue".bright_white().bold());

    for line in table.to_string().lines() {
        println!("  {line}");
    }
}
