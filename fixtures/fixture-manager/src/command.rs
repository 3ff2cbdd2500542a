// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use clap::Parser;
use color_eyre::Result;
use ethics_kernel::FormulaParams;
use fixture_details::AllFixtures;

#[derive(Debug, Parser)]
pub struct FixtureManagerApp {
    #[clap(subcommand)]
    command: FixtureManagerCommand,
}

#[derive(Debug, Parser)]
pub enum FixtureManagerCommand {
    /// Generate random formulas and report satisfiability statistics.
    GenerateInputs {
        #[clap(long, short, default_value_t = 64)]
        count: usize,
        /// Number of distinct atoms.
        #[clap(long, short, default_value_t = 3)]
        atoms: usize,
        /// Also generate predicates and comparisons.
        #[clap(long, short)]
        predicates: bool,
    },
    /// Compile the named fixtures and write them out.
    GenerateOutputs,
}

impl FixtureManagerApp {
    pub fn exec(self) -> Result<()> {
        self.command.exec()
    }
}

impl FixtureManagerCommand {
    pub fn exec(self) -> Result<()> {
        match self {
            Self::GenerateInputs {
                count,
                atoms,
                predicates,
            } => {
                let params = FormulaParams::default()
                    .with_atom_count(atoms)
                    .with_predicates(predicates);
                AllFixtures::generate_inputs(count, params)
            }
            Self::GenerateOutputs => AllFixtures::get().generate_outputs(),
        }
    }
}
