// Copyright (c) The ethics-kernel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{details::FixtureDetails, value_generator::ValueGenerator};
use camino::{Utf8Path, Utf8PathBuf};
use color_eyre::{
    eyre::{bail, WrapErr},
    Result,
};
use ethics_kernel::{entails, satisfiable, Formula, FormulaParams, PrimeCompiler};
use once_cell::sync::Lazy;
use proptest::prelude::*;
use std::fmt::Write;

pub struct AllFixtures {
    dir: Utf8PathBuf,
}

static ALL_FIXTURES_STATIC: Lazy<AllFixtures> = Lazy::new(AllFixtures::init);

impl AllFixtures {
    pub fn get() -> &'static Self {
        &*ALL_FIXTURES_STATIC
    }

    fn init() -> Self {
        let manifest_dir = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
        let dir = match manifest_dir.parent() {
            Some(parent) => parent.join("data"),
            None => manifest_dir.join("data"),
        };
        Self { dir }
    }

    /// The directory compiled fixtures are written to.
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Generates `count` random formulas and reports how many are satisfiable and how many are
    /// valid under the domain theory.
    pub fn generate_inputs(count: usize, params: FormulaParams) -> Result<()> {
        let mut value_gen = ValueGenerator::from_seed(("ethics-kernel", params.atom_count));

        let mut satisfiable_count = 0;
        let mut valid_count = 0;
        for _ in 0..count {
            let mut gen = value_gen.partial_clone();
            let formula = gen.generate(any_with::<Formula>(params))?;
            if satisfiable(&formula) {
                satisfiable_count += 1;
            }
            if entails(&Formula::Bool(true), &formula) {
                valid_count += 1;
            }
            log::debug!("generated {}", formula);
        }

        println!(
            "of {} formulas: {} satisfiable, {} valid",
            count, satisfiable_count, valid_count
        );

        Ok(())
    }

    /// Compiles every named fixture and writes its prime implicants and implicates to the data
    /// directory.
    pub fn generate_outputs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .wrap_err_with(|| format!("failed to create fixture directory {}", self.dir))?;

        for details in FixtureDetails::all().values() {
            let primes = PrimeCompiler::new(details.formula()).compile();
            let counts = (primes.implicants.len(), primes.implicates.len());
            if let Some(expected) = details.expected_counts() {
                if counts != expected {
                    bail!(
                        "fixture {}: expected {:?} prime implicants and implicates, found {:?}",
                        details.name(),
                        expected,
                        counts
                    );
                }
            }

            let mut out = String::new();
            writeln!(out, "formula: {}", details.formula())?;
            writeln!(out, "validity: {:?}", primes.validity)?;
            writeln!(out, "implicants:")?;
            for term in primes.implicant_terms() {
                writeln!(out, "  {}", term)?;
            }
            writeln!(out, "implicates:")?;
            for clause in primes.implicate_clauses() {
                writeln!(out, "  {}", clause)?;
            }

            let path = self.dir.join(format!("{}.txt", details.name()));
            std::fs::write(&path, out)
                .wrap_err_with(|| format!("failed to write fixture {}", path))?;
            log::info!(
                "wrote {} ({} implicants, {} implicates)",
                path,
                counts.0,
                counts.1
            );
        }

        Ok(())
    }
}
