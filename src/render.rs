//! Text rendering of an observation.
//!
//! Machines are laid out one row per subnet, in order of id within the
//! subnet. Key, for each machine:
//!
//! ```text
//! C   sensitive & compromised
//! R   sensitive & reachable
//! S   sensitive
//! c   compromised
//! r   reachable
//! o   none of the above
//! ```

use crate::network::Subnet;
use crate::observation::{MachineObservation, Observation};

const RULE: &str = "-----------------------------";
const ROW_LABEL_WIDTH: usize = "subnet X: ".len();

/// Display symbol for a single machine
pub fn machine_symbol(machine: &MachineObservation) -> char {
    match (machine.sensitive, machine.compromised, machine.reachable) {
        (true, true, _) => 'C',
        (true, false, true) => 'R',
        (true, false, false) => 'S',
        (false, true, _) => 'c',
        (false, false, true) => 'r',
        (false, false, false) => 'o',
    }
}

/// Render an observation, with shorter rows centred under the longest one
pub fn render(observation: &Observation) -> String {
    let rows: Vec<String> = Subnet::ALL
        .iter()
        .map(|subnet| {
            observation
                .iter()
                .filter(|(a, _)| a.subnet == *subnet)
                .map(|(_, m)| machine_symbol(m))
                .collect()
        })
        .collect();

    let max_row = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    let min_row = rows.iter().map(|r| r.len()).min().unwrap_or(0);

    let mut output = format!("\n{}", RULE);
    for (i, row) in rows.iter().enumerate() {
        output.push_str(&format!("\nsubnet {}: ", i));
        output.push_str(&" ".repeat((max_row - row.len()) / 2));
        output.push_str(row);
        output.push('\n');
        if i < rows.len() - 1 {
            output.push_str(&" ".repeat(ROW_LABEL_WIDTH + (max_row - min_row) / 2));
            output.push('|');
        }
    }
    output.push_str(RULE);
    output.push('\n');
    output
}
