//! List contracts command implementation.

use kindlint_core::{ContractShape, ContractType, DiagnosticCode};

/// Runs the list-contracts command.
pub fn run() {
    println!("Available contracts:\n");
    println!("{:<9} {:<15} {:<12} Description", "Code", "Name", "Shape");
    println!("{}", "-".repeat(80));

    for contract_type in ContractType::ALL {
        println!(
            "{:<9} {:<15} {:<12} {}",
            contract_type.code().to_string(),
            contract_type.key(),
            shape_name(contract_type.shape()),
            contract_type.description()
        );
    }

    println!(
        "\n{} is reported for contracts with the wrong number of arguments.",
        DiagnosticCode::InvalidContract
    );
    println!("\nShapes, as written in defineContracts:");
    println!("  pairwise     [[\"a\", \"b\"], ...]  one contract per pair");
    println!("  individual   [\"a\", ...]         one contract per entry");
    println!("  collective   [\"a\", \"b\", ...]    one contract over all entries");
}

fn shape_name(shape: ContractShape) -> &'static str {
    match shape {
        ContractShape::Pairwise => "pairwise",
        ContractShape::Individual => "individual",
        ContractShape::Collective => "collective",
    }
}
