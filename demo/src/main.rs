//! Inserts random messages into a Merkle red-black tree, then checks that one
//! of them verifies and that a tampered copy does not.

use anyhow::{bail, ensure, Context, Result};
use clap::{Parser, ValueEnum};
use mrbt::{
    visualize::{to_hex, visualize_stdout},
    Blake3Hasher, MerkleRbTree, NodeHasher, OperationCost, Sha256Hasher, TreeConfig,
};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "mrbt-demo", about = "Merkle red-black tree insertion and verification driver")]
struct Cli {
    /// Number of random messages to insert.
    #[arg(long, default_value_t = 1000)]
    messages: usize,
    /// Messages are shorter than this many bytes.
    #[arg(long, default_value_t = 65535)]
    max_len: usize,
    /// Seed for message generation; drawn from entropy when absent.
    #[arg(long)]
    seed: Option<u64>,
    /// Spacing between consecutive leaf keys.
    #[arg(long, default_value_t = mrbt::DEFAULT_SCALING_FACTOR)]
    scaling_factor: u64,
    /// Digest function.
    #[arg(long, value_enum, default_value_t = HasherKind::Sha256)]
    hasher: HasherKind,
    /// Draw the finished tree to stdout.
    #[arg(long)]
    visualize: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum HasherKind {
    Sha256,
    Blake3,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    ensure!(cli.messages > 0, "at least one message is required");
    ensure!(cli.max_len > 0, "maximum message length must be positive");

    match cli.hasher {
        HasherKind::Sha256 => run::<Sha256Hasher>(&cli),
        HasherKind::Blake3 => run::<Blake3Hasher>(&cli),
    }
}

fn run<H: NodeHasher>(cli: &Cli) -> Result<()> {
    let seed = cli.seed.unwrap_or_else(rand::random);
    info!(seed, messages = cli.messages, max_len = cli.max_len, "generating messages");
    let mut rng = SmallRng::seed_from_u64(seed);
    let messages = random_messages(&mut rng, cli.messages, cli.max_len);

    let mut tree = MerkleRbTree::<H>::with_config(TreeConfig::with_scaling_factor(
        cli.scaling_factor,
    ))
    .context("invalid tree configuration")?;

    let mut total = OperationCost::default();
    for (i, message) in messages.iter().enumerate() {
        let key = (i as u64)
            .checked_mul(cli.scaling_factor)
            .with_context(|| format!("key of message {i} exceeds u64"))?;
        tree.insert(H::digest(message), key)
            .unwrap_add_cost(&mut total)
            .with_context(|| format!("failed to insert message {i}"))?;
    }
    info!(
        entries = tree.len(),
        nodes = tree.node_count(),
        height = tree.height(),
        seeks = total.seek_count,
        hashes = total.hash_node_calls,
        rotations = total.rotation_count,
        "tree built"
    );

    let audit = tree.audit();
    info!(
        height = audit.height,
        black_height = ?audit.black_height,
        red_red_violations = audit.red_red_violations,
        root_is_black = audit.root_is_black,
        "red-black audit"
    );
    if let Some(root_hash) = tree.root_hash() {
        info!(root_hash = %to_hex(&root_hash), "root hash");
    }
    if cli.visualize {
        visualize_stdout(&tree).context("failed to draw tree")?;
    }

    let index = rng.gen_range(0..messages.len());
    let key = index as u64 * cli.scaling_factor;
    let mut message = messages[index].clone();
    debug!(index, key, len = message.len(), "verifying message");

    let verified = tree.verify(&H::digest(&message), key);
    debug!(seeks = verified.cost.seek_count, hashes = verified.cost.hash_node_calls, "verified");
    if verified.value {
        println!("Message Verified Correctly");
    } else {
        println!("ERROR");
        bail!("message {index} failed verification");
    }

    // generated messages never contain lowercase letters
    message.push(b'a');
    if tree.verify(&H::digest(&message), key).unwrap() {
        println!("ERROR");
        bail!("tampered message {index} passed verification");
    }
    println!("Message Verification Failed Correctly");

    Ok(())
}

/// Messages of random length below `max_len` made of capital letters.
fn random_messages(rng: &mut SmallRng, count: usize, max_len: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|_| {
            let len = rng.gen_range(0..max_len);
            (0..len).map(|_| rng.gen_range(b'A'..=b'Z')).collect()
        })
        .collect()
}
