//! Output formatting for CLI

use crate::{
    learning::{PolicyFlags, PolicyStore},
    pipeline::SessionResult,
    tictactoe::BoardState,
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

fn count_and_rate(count: usize, rate: f64) -> String {
    format!("{count} ({:.1}%)", rate * 100.0)
}

/// Print a session tally with the seat names
pub fn print_result(result: &SessionResult, a_name: &str, b_name: &str) {
    print_kv("Games", &result.total_games.to_string());
    print_kv(
        &format!("{a_name} wins"),
        &count_and_rate(result.a_wins, result.a_win_rate()),
    );
    print_kv(
        &format!("{b_name} wins"),
        &count_and_rate(result.b_wins, result.b_win_rate()),
    );
    print_kv("Draws", &count_and_rate(result.draws, result.draw_rate()));
}

/// Print the size of every non-empty policy table, followed by its
/// `busiest` most observed states
pub fn print_store(store: &PolicyStore, busiest: usize) {
    for flags in PolicyFlags::ALL {
        let table = store.snapshot(flags);
        if table.entry_count() == 0 {
            continue;
        }
        print_kv(
            &format!("table [{flags}]"),
            &format!(
                "{} states, {} pairs",
                table.state_count(),
                table.entry_count()
            ),
        );
        for (key, observations) in table.busiest_states(busiest) {
            println!("    {key}  {observations} observations");
        }
    }
}

/// Render a board with row and column labels
pub fn render_board(state: &BoardState) -> String {
    let mut out = String::from("    0   1   2\n");
    for (row, cells) in state.cells().iter().enumerate() {
        if row > 0 {
            out.push_str("   ---+---+---\n");
        }
        let line: Vec<String> = cells
            .iter()
            .map(|cell| match cell.to_player() {
                Some(player) => player.to_char().to_string(),
                None => " ".to_string(),
            })
            .collect();
        out.push_str(&format!("{row}   {}\n", line.join(" | ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_board_labels_rows_and_columns() {
        let state = BoardState::from_string("X...O....").unwrap();
        let rendered = render_board(&state);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "    0   1   2");
        assert_eq!(lines[1], "0   X |   |  ");
        assert_eq!(lines[3], "1     | O |  ");
        assert_eq!(lines.len(), 6);
    }
}
