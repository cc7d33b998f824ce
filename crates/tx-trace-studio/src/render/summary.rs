//! Terminal summary of a replay run.

use crate::replay::{ReplaySummary, TxOutcome};
use colored::*;

/// Render a human-readable summary of a replay for the terminal
pub fn render_terminal_summary(summary: &ReplaySummary) -> String {
    let mut out = String::new();

    out.push_str(&render_header(summary));
    out.push_str(&render_transactions(&summary.outcomes));
    out.push_str(&render_classification(summary));
    out.push_str(&render_status(summary));

    out
}

fn render_header(summary: &ReplaySummary) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&"Trace Replay Summary".bold().to_string());
    out.push_str("\n---------------------------------------------------\n");
    out.push_str(&format!("Transactions: {}\n", summary.transactions()));
    out.push_str(&format!("Stored:       {}\n", summary.stored()));
    out.push_str("---------------------------------------------------\n\n");
    out
}

fn render_transactions(outcomes: &[TxOutcome]) -> String {
    let mut out = String::new();

    for outcome in outcomes {
        let marker = match (outcome.stored, outcome.complete) {
            (true, true) => "✓".green(),
            (true, false) => "!".yellow(),
            (false, _) => "✗".red(),
        };
        out.push_str(&format!(
            "{} {}  calls {:>4}  events {:>4}  transfers {:>4}",
            marker, outcome.tx_hash, outcome.calls, outcome.events, outcome.transfers
        ));
        if outcome.dropped > 0 {
            out.push_str(&format!("  ({} dropped)", outcome.dropped).yellow().to_string());
        }
        out.push('\n');
    }
    out
}

fn render_classification(summary: &ReplaySummary) -> String {
    let mut out = String::new();
    out.push_str("\nClassified events:\n");
    out.push_str(&format!("  ERC20 transfers:  {}\n", summary.erc20_transfers));
    out.push_str(&format!("  ERC721 transfers: {}\n", summary.erc721_transfers));
    out.push_str(&format!("  Approvals:        {}\n", summary.approvals));
    out.push_str(&format!("  Native transfers: {}\n", summary.native_transfers));
    out.push_str(&format!("  Unclassified:     {}\n", summary.unclassified));
    out
}

fn render_status(summary: &ReplaySummary) -> String {
    let failed = summary.transactions() - summary.stored();
    let incomplete = summary.incomplete();

    let status = if failed > 0 {
        format!("{} record(s) could not be stored", failed).red().bold()
    } else if incomplete > 0 {
        format!("{} trace(s) incomplete (depth bound)", incomplete).yellow().bold()
    } else {
        "All traces complete".green().bold()
    };

    format!("\nStatus: {}\n", status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_mentions_each_transaction() {
        colored::control::set_override(false);

        let summary = ReplaySummary {
            outcomes: vec![TxOutcome {
                tx_hash: "0xabc".to_string(),
                calls: 3,
                events: 1,
                transfers: 1,
                dropped: 2,
                complete: false,
                stored: true,
            }],
            erc20_transfers: 1,
            ..Default::default()
        };

        let text = render_terminal_summary(&summary);
        assert!(text.contains("0xabc"));
        assert!(text.contains("(2 dropped)"));
        assert!(text.contains("1 trace(s) incomplete"));
        assert!(text.contains("ERC20 transfers:  1"));
    }
}
