use std::collections::HashMap;

use robdd::bdd::Bdd;
use robdd::order::ReverseOrder;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let bdd = Bdd::default();
    println!("bdd = {:?}", bdd);

    println!("zero = {}", bdd.zero());
    println!("one = {}", bdd.one());

    let x1 = bdd.mk_var(1);
    println!("x1 = {}", x1);
    let x2 = bdd.mk_var(2);
    println!("x2 = {}", x2);
    let x3 = bdd.mk_var(3);
    println!("x3 = {}", x3);

    let cube = bdd.cube([(1, true), (2, true), (3, true)]);
    println!("cube = {}", bdd.to_bracket_string(cube));
    let f = bdd.cube([(2, true)]);
    println!("f = {}", bdd.to_bracket_string(f));
    let h = bdd.restrict_law(f, cube);
    println!("h = {}", bdd.to_bracket_string(h));

    let g = bdd.apply_or(bdd.apply_and(x1, bdd.apply_not(x2)), x3);
    println!("g = {}", bdd.to_bracket_string(g));
    println!("support(g) = {:?}", bdd.support(g));
    let g_x3 = bdd.restrict(g, 3, false);
    println!("g|x3=0 = {}", bdd.to_bracket_string(g_x3));

    let swapped = bdd.subst_set(g, &HashMap::from([(1, x2), (2, x1)]));
    println!("g[x1 := x2, x2 := x1] = {}", bdd.to_bracket_string(swapped));
    println!("sat_count(g, 3) = {}", bdd.sat_count(g, 3));
    println!("one_sat(g) = {:?}", bdd.one_sat(g));

    // The same function under the reverse order has a different shape.
    let rev = Bdd::with_order(ReverseOrder);
    let g = rev.apply_or(
        rev.apply_and(rev.mk_var(1), rev.apply_not(rev.mk_var(2))),
        rev.mk_var(3),
    );
    println!("g (reversed) = {}", rev.to_bracket_string(g));
    println!("bdd = {:?}", bdd);
    println!("rev = {:?}", rev);

    Ok(())
}
