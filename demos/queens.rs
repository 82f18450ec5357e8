use clap::Parser;

use robdd::bdd::{Bdd, BddConfig};
use robdd::reference::Ref;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of queens.
    #[arg(value_name = "INT", default_value = "8")]
    n: usize,

    /// Initial BDD size (in bits, so the initial table has `2^size` buckets).
    #[clap(long, value_name = "INT", default_value = "20")]
    size: usize,

    /// Initial size of the operation caches (in bits).
    #[clap(long, value_name = "INT", default_value = "16")]
    cache_bits: usize,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let config = BddConfig::default()
        .with_storage_bits(args.size)
        .with_cache_bits(args.cache_bits);
    let bdd = Bdd::with_config(config);
    println!("bdd = {:?}", bdd);

    // Encode N-queens problem:
    // - N queens on an NxN board
    // - At least one queen per row
    // - No two queens attack each other
    let n = args.n;
    println!("Encoding n-queens problem with n = {}", n);
    let var = |i: usize, j: usize| (i * n + j + 1) as u32;
    let queens = (0..n)
        .map(|i| (0..n).map(|j| bdd.mk_var(var(i, j))).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut constraints: Vec<Ref> = vec![];

    // At least one queen per row
    for row in queens.iter() {
        constraints.push(bdd.apply_or_all(row.iter().copied()));
    }

    // No two queens on the same row, column or diagonal
    for i in 0..n {
        for j in 0..n {
            for k in i..n {
                for l in 0..n {
                    if (k, l) <= (i, j) {
                        continue;
                    }
                    let attacks = i == k || j == l || i + l == k + j || i + j == k + l;
                    if attacks {
                        let both = bdd.cube([(var(i, j), true), (var(k, l), true)]);
                        constraints.push(bdd.apply_not(both));
                    }
                }
            }
        }
    }

    println!(
        "Total {} constraints of total size {}",
        constraints.len(),
        bdd.descendants(constraints.iter().copied()).len()
    );

    println!("Merging constraints...");
    let res = bdd.apply_and_all(constraints.iter().copied());
    println!("bdd = {:?}", bdd);
    println!("res of size {}", bdd.size(res));

    let solutions = bdd.sat_count(res, n * n);
    println!("Solutions: {}", solutions);
    if let Some(model) = bdd.one_sat(res) {
        for i in 0..n {
            let line = (0..n)
                .map(|j| {
                    if model.contains(&(var(i, j), true)) {
                        'Q'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            println!("{}", line);
        }
    }

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
