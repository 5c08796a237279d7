use comfy_table::{
    Attribute, Cell, Color, ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS,
    presets::UTF8_FULL,
};
use engine::{
    PaymentChain, PaymentIdRequest, Protocol, ProtocolRegistry, ResolutionOutcome,
    ResolutionRequest, TestCase,
};
use owo_colors::OwoColorize;
use strum::IntoEnumIterator;

fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::White).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
    table
}

fn print_table(title: &str, table: &Table) {
    println!("\n  {}", title.bright_white().bold());
    for line in table.to_string().lines() {
        println!("  {line}");
    }
}

fn protocol_color(protocol: Protocol) -> Color {
    match protocol {
        Protocol::Evm => Color::Cyan,
        Protocol::Solana => Color::Magenta,
        Protocol::Sei => Color::Red,
        Protocol::Injective => Color::Blue,
        Protocol::PaymentId => Color::Yellow,
        _ => Color::White,
    }
}

/// Comma separated method names the registry allows for `protocol`.
pub fn method_list(registry: &ProtocolRegistry, protocol: Protocol) -> String {
    registry
        .methods_for(protocol)
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn print_protocols(registry: &ProtocolRegistry) {
    let mut table = table(&["Protocol", "Methods", "Timeout"]);

    for protocol in Protocol::iter() {
        let timeout = if registry.supports_timeout(protocol) {
            Cell::new("● supported").fg(Color::Green)
        } else {
            Cell::new("doesn't support timeout parameter").fg(Color::Yellow)
        };

        table.add_row(vec![
            Cell::new(protocol)
                .fg(protocol_color(protocol))
                .add_attribute(Attribute::Bold),
            Cell::new(method_list(registry, protocol).replace(", ", "\n")),
            timeout,
        ]);
    }

    print_table("Protocols", &table);
}

pub fn print_cases(cases: &[TestCase]) {
    let mut table = table(&["Key", "Title", "Protocol", "Domain", "Address", "Chain"]);

    for case in cases {
        table.add_row(vec![
            Cell::new(&case.key).add_attribute(Attribute::Bold),
            Cell::new(&case.title),
            Cell::new(case.protocol).fg(protocol_color(case.protocol)),
            Cell::new(&case.domain),
            Cell::new(&case.address).fg(Color::DarkGrey),
            Cell::new(case.chain_id.map(|id| id.to_string()).unwrap_or_default()),
        ]);
    }

    print_table("Test Cases", &table);
}

pub fn print_chains() {
    let mut table = table(&["ID", "Chain"]);

    for chain in PaymentChain::iter() {
        table.add_row(vec![
            Cell::new(chain.id()).fg(Color::Yellow),
            Cell::new(chain),
        ]);
    }

    print_table("PaymentID Chains", &table);
}

pub fn request_rows(request: &ResolutionRequest) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Protocol", request.protocol.to_string()),
        ("Method", request.method.to_string()),
        ("Input", request.input().to_owned()),
        ("Timeout", format!("{}ms", request.timeout_ms)),
    ];
    if let Some(chain_id) = request.chain_id {
        rows.push(("Chain ID", chain_id.to_string()));
    }
    if let Some(rpc_url) = &request.rpc_url {
        rows.push(("RPC URL", rpc_url.clone()));
    }
    rows
}

pub fn payment_rows(request: &PaymentIdRequest) -> Vec<(&'static str, String)> {
    let chain = PaymentChain::from_id(request.chain_id)
        .map_or_else(|| request.chain_id.to_string(), |c| format!("{c} ({})", c.id()));

    vec![
        ("Protocol", Protocol::PaymentId.to_string()),
        ("Domain", request.domain.clone()),
        ("Chain", chain),
    ]
}

/// Prints the request summary followed by the outcome and request time.
pub fn print_outcome(rows: &[(&str, String)], outcome: &ResolutionOutcome, not_found: &str) {
    let mut table = table(&["Field", "Value"]);

    for (field, value) in rows {
        table.add_row(vec![Cell::new(field).fg(Color::DarkGrey), Cell::new(value)]);
    }

    let (status, color) = match outcome {
        ResolutionOutcome::Success { value: Some(_), .. } => ("Success", Color::Green),
        ResolutionOutcome::Success { value: None, .. } => ("Success (not found)", Color::Yellow),
        ResolutionOutcome::Failure { .. } => ("Error", Color::Red),
    };

    table.add_row(vec![
        Cell::new("Status").fg(Color::DarkGrey),
        Cell::new(status).fg(color).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Result").fg(Color::DarkGrey),
        Cell::new(outcome.render(not_found)).fg(color),
    ]);
    table.add_row(vec![
        Cell::new("Request time").fg(Color::DarkGrey),
        Cell::new(format!("{}ms", outcome.elapsed_ms())),
    ]);

    print_table("Resolution Result", &table);
}

#[cfg(test)]
mod tests {
    use engine::{Method, PROTOCOL_REGISTRY};

    use super::*;

    #[test]
    fn test_method_list() {
        assert_eq!(
            method_list(&PROTOCOL_REGISTRY, Protocol::Solana),
            "getAddress, getDomainName"
        );
        assert_eq!(
            method_list(&ProtocolRegistry::new(), Protocol::Evm),
            "getAddress"
        );
    }

    #[test]
    fn test_request_rows() {
        let request = ResolutionRequest::new(Protocol::Evm, Method::BatchGetDomainNameByChainId)
            .with_address("0x1")
            .with_chain_id(Some(56))
            .with_timeout_ms(-1);

        let rows = request_rows(&request);
        assert_eq!(rows[2], ("Input", "0x1".to_owned()));
        assert_eq!(rows[3], ("Timeout", "-1ms".to_owned()));
        assert_eq!(rows[4], ("Chain ID", "56".to_owned()));
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn test_payment_rows() {
        let rows = payment_rows(&PaymentIdRequest::new("jerry@binance", PaymentChain::Ethereum));
        assert_eq!(rows[2], ("Chain", "Ethereum (EVM) (1)".to_owned()));

        let rows = payment_rows(&PaymentIdRequest {
            domain: "jerry@binance".to_owned(),
            chain_id: 42,
        });
        assert_eq!(rows[2], ("Chain", "42".to_owned()));
    }
}
