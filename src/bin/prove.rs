//! Prove a query against a knowledge-base file.
//!
//! ```text
//! prove [--json] <knowledge-base> <query>
//! ```
//!
//! Set `RUST_LOG=debug` to follow the search.

use anyhow::{bail, Context, Result};
use hornlog::{Engine, Proof};
use std::{env, fs};

fn main() -> Result<()> {
    env_logger::init();

    let mut json = false;
    let mut positional = Vec::new();
    for arg in env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            positional.push(arg);
        }
    }
    let [path, query] = positional.as_slice() else {
        bail!("usage: prove [--json] <knowledge-base> <query>");
    };

    let source = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let engine = Engine::from_source(&source).with_context(|| format!("loading {path}"))?;
    log::info!(
        "loaded {} rules and {} terminals from {path}",
        engine.rules().len(),
        engine.terminals().len()
    );

    match engine.proof(query).context("parsing query")? {
        Some(proof) if json => println!("{}", render_json(&proof)?),
        Some(proof) => {
            println!("proof of {query}:");
            print!("{proof}");
        }
        None => println!("no proof found for {query}"),
    }
    Ok(())
}

#[cfg(feature = "serde")]
fn render_json(proof: &Proof) -> Result<String> {
    proof.to_json().context("serializing proof")
}

#[cfg(not(feature = "serde"))]
fn render_json(_proof: &Proof) -> Result<String> {
    bail!("--json requires the serde feature")
}
