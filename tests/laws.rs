//! Exhaustive checks over all 256 boolean functions of three variables.
//!
//! Every function is identified by its truth table: bit `m` of the table is the
//! value of the function on the assignment where variable `v` is bit `v - 1` of `m`.

use std::collections::{BTreeSet, HashMap, HashSet};

use num_bigint::BigUint;
use test_log::test;

use robdd::bdd::{Bdd, BddConfig};
use robdd::order::{CustomOrder, ItemOrder, NaturalOrder, ReverseOrder};
use robdd::reference::Ref;

const VARS: [u32; 3] = [1, 2, 3];

/// A spread of tables used where all 256 would be too many.
fn sample(step: usize) -> impl Iterator<Item = u8> {
    (0..=255u8).step_by(step).chain([255])
}

fn value(m: u8, v: u32) -> bool {
    (m >> (v - 1)) & 1 != 0
}

fn with_value(m: u8, v: u32, b: bool) -> u8 {
    if b {
        m | (1 << (v - 1))
    } else {
        m & !(1 << (v - 1))
    }
}

fn bit(table: u8, m: u8) -> bool {
    (table >> m) & 1 != 0
}

/// Packs the first `width` bits into a number.
fn pack(width: u8, bits: impl Fn(u8) -> bool) -> u8 {
    (0..width).filter(|&k| bits(k)).fold(0, |t, k| t | (1 << k))
}

/// Truth table from the value on each of the 8 assignments.
fn from_bits(bits: impl Fn(u8) -> bool) -> u8 {
    pack(8, bits)
}

fn var_table(v: u32) -> u8 {
    from_bits(|m| value(m, v))
}

fn depends_on(table: u8, v: u32) -> bool {
    (0..8).any(|m| bit(table, m) != bit(table, m ^ (1 << (v - 1))))
}

fn build<O: ItemOrder>(bdd: &Bdd<O>, table: u8) -> Ref {
    bdd.apply_or_all(
        (0..8)
            .filter(|&m| bit(table, m))
            .map(|m| bdd.cube(VARS.map(|v| (v, value(m, v))))),
    )
}

fn table_of<O: ItemOrder>(bdd: &Bdd<O>, f: Ref) -> u8 {
    from_bits(|m| bdd.evaluate(f, |v| value(m, v)))
}

fn all_functions<O: ItemOrder>(bdd: &Bdd<O>) -> Vec<Ref> {
    (0..=255u8).map(|t| build(bdd, t)).collect()
}

fn check_canonical<O: ItemOrder>(bdd: &Bdd<O>) {
    let fs = all_functions(bdd);

    assert_eq!(fs[0x00], bdd.zero());
    assert_eq!(fs[0xFF], bdd.one());
    assert_eq!(fs.iter().collect::<HashSet<_>>().len(), 256);

    for (t, &f) in fs.iter().enumerate() {
        assert!(bdd.is_well_formed(f), "{} is malformed", bdd.to_bracket_string(f));
        assert_eq!(table_of(bdd, f) as usize, t);
    }

    // Rebuilding yields the very same handles.
    let num_nodes = bdd.num_nodes();
    assert_eq!(all_functions(bdd), fs);
    assert_eq!(bdd.num_nodes(), num_nodes);
}

fn check_operations<O: ItemOrder>(bdd: &Bdd<O>) {
    let fs = all_functions(bdd);

    for a in 0..=255u8 {
        let fa = fs[a as usize];
        assert_eq!(bdd.apply_not(fa), fs[!a as usize]);
        assert_eq!(bdd.apply_not(bdd.apply_not(fa)), fa);
        assert_eq!(bdd.apply_and(fa, bdd.apply_not(fa)), bdd.zero());
        assert_eq!(bdd.apply_or(fa, bdd.apply_not(fa)), bdd.one());
        assert_eq!(bdd.apply_and(bdd.one(), fa), fa);
        assert_eq!(bdd.apply_and(bdd.zero(), fa), bdd.zero());
        assert_eq!(bdd.apply_or(bdd.one(), fa), bdd.one());
        assert_eq!(bdd.apply_or(bdd.zero(), fa), fa);
        assert_eq!(bdd.apply_and(fa, fa), fa);
        assert_eq!(bdd.apply_or(fa, fa), fa);

        for b in sample(7) {
            let fb = fs[b as usize];
            assert_eq!(bdd.apply_and(fa, fb), fs[(a & b) as usize]);
            assert_eq!(bdd.apply_or(fa, fb), fs[(a | b) as usize]);
            assert_eq!(bdd.apply_xor(fa, fb), fs[(a ^ b) as usize]);
            assert_eq!(bdd.apply_iff(fa, fb), fs[!(a ^ b) as usize]);
            assert_eq!(bdd.apply_imply(fa, fb), fs[(!a | b) as usize]);
            assert_eq!(bdd.apply_and(fa, fb), bdd.apply_and(fb, fa));
            assert_eq!(bdd.apply_or(fa, fb), bdd.apply_or(fb, fa));

            // De Morgan
            assert_eq!(
                bdd.apply_not(bdd.apply_and(fa, fb)),
                bdd.apply_or(bdd.apply_not(fa), bdd.apply_not(fb))
            );
            // Absorption
            assert_eq!(bdd.apply_and(fa, bdd.apply_or(fa, fb)), fa);
            assert_eq!(bdd.apply_or(fa, bdd.apply_and(fa, fb)), fa);
        }
    }

    for a in sample(23) {
        for b in sample(29) {
            for c in sample(31) {
                let (fa, fb, fc) = (fs[a as usize], fs[b as usize], fs[c as usize]);
                assert_eq!(
                    bdd.apply_ite(fa, fb, fc),
                    fs[((a & b) | (!a & c)) as usize]
                );
                assert_eq!(
                    bdd.apply_and(fa, bdd.apply_and(fb, fc)),
                    bdd.apply_and(bdd.apply_and(fa, fb), fc)
                );
                assert_eq!(
                    bdd.apply_or(fa, bdd.apply_or(fb, fc)),
                    bdd.apply_or(bdd.apply_or(fa, fb), fc)
                );
                assert_eq!(
                    bdd.apply_and(fa, bdd.apply_or(fb, fc)),
                    bdd.apply_or(bdd.apply_and(fa, fb), bdd.apply_and(fa, fc))
                );
                assert_eq!(
                    bdd.apply_or(fa, bdd.apply_and(fb, fc)),
                    bdd.apply_and(bdd.apply_or(fa, fb), bdd.apply_or(fa, fc))
                );
            }
        }
    }

    let all = [fs[0xAA], fs[0xCC], fs[0xF0]];
    assert_eq!(bdd.apply_and_all(all), fs[0x80]);
    assert_eq!(bdd.apply_or_all(all), fs[0xFE]);
    assert_eq!(bdd.apply_and_all([]), bdd.one());
    assert_eq!(bdd.apply_or_all([]), bdd.zero());
}

fn check_support_and_evaluate<O: ItemOrder>(bdd: &Bdd<O>) {
    let fs = all_functions(bdd);

    for v in VARS {
        assert_eq!(bdd.support(bdd.mk_var(v)), BTreeSet::from([v]));
    }

    for a in 0..=255u8 {
        let fa = fs[a as usize];
        let expected = VARS
            .into_iter()
            .filter(|&v| depends_on(a, v))
            .collect::<BTreeSet<_>>();
        assert_eq!(bdd.support(fa), expected);
        assert_eq!(bdd.support(bdd.apply_not(fa)), expected);

        for m in 0..8 {
            let valuation = |v: u32| value(m, v);
            assert_eq!(bdd.evaluate(fa, valuation), bit(a, m));
            assert_eq!(bdd.evaluate(bdd.apply_not(fa), valuation), !bit(a, m));
        }

        for b in sample(13) {
            let fb = fs[b as usize];
            let union = &bdd.support(fa) | &bdd.support(fb);
            assert!(bdd.support(bdd.apply_and(fa, fb)).is_subset(&union));
        }
    }
}

fn check_restrict<O: ItemOrder>(bdd: &Bdd<O>) {
    let fs = all_functions(bdd);

    for v in VARS {
        let x = bdd.mk_var(v);
        assert_eq!(bdd.restrict(x, v, true), bdd.one());
        assert_eq!(bdd.restrict(x, v, false), bdd.zero());
    }

    for a in 0..=255u8 {
        let fa = fs[a as usize];
        for v in VARS {
            let [low, high] = [false, true].map(|b| {
                let r = bdd.restrict(fa, v, b);
                let expected = from_bits(|m| bit(a, with_value(m, v, b)));
                assert_eq!(r, fs[expected as usize]);
                assert_eq!(bdd.restrict(r, v, b), r);
                assert!(!bdd.support(r).contains(&v));
                assert_eq!(bdd.restrict(bdd.apply_not(fa), v, b), bdd.apply_not(r));
                r
            });

            // Shannon expansion
            let x = bdd.mk_var(v);
            let expansion = bdd.apply_or(
                bdd.apply_and(x, high),
                bdd.apply_and(bdd.apply_not(x), low),
            );
            assert_eq!(expansion, fa);
        }

        for b in sample(37) {
            let fb = fs[b as usize];
            for v in VARS {
                for value in [false, true] {
                    assert_eq!(
                        bdd.restrict(bdd.apply_and(fa, fb), v, value),
                        bdd.apply_and(bdd.restrict(fa, v, value), bdd.restrict(fb, v, value))
                    );
                    assert_eq!(
                        bdd.restrict(bdd.apply_or(fa, fb), v, value),
                        bdd.apply_or(bdd.restrict(fa, v, value), bdd.restrict(fb, v, value))
                    );
                }
            }
        }
    }
}

/// All partial assignments over the three variables.
fn partial_assignments() -> Vec<HashMap<u32, bool>> {
    let mut res = vec![HashMap::new()];
    for v in VARS {
        let mut next = Vec::new();
        for assignment in res {
            for value in [None, Some(false), Some(true)] {
                let mut assignment = assignment.clone();
                if let Some(b) = value {
                    assignment.insert(v, b);
                }
                next.push(assignment);
            }
        }
        res = next;
    }
    res
}

fn check_restrict_set<O: ItemOrder>(bdd: &Bdd<O>) {
    let fs = all_functions(bdd);
    let assignments = partial_assignments();
    assert_eq!(assignments.len(), 27);

    for a in 0..=255u8 {
        let fa = fs[a as usize];
        assert_eq!(bdd.restrict_set(fa, &HashMap::new()), fa);

        for assignment in assignments.iter() {
            let r = bdd.restrict_set(fa, assignment);
            let iterated = assignment
                .iter()
                .fold(fa, |f, (&v, &b)| bdd.restrict(f, v, b));
            assert_eq!(r, iterated);
            assert_eq!(bdd.restrict_set(r, assignment), r);
            assert_eq!(
                bdd.restrict_set(bdd.apply_not(fa), assignment),
                bdd.apply_not(r)
            );

            // A cube law constrains to the same cofactor.
            let law = bdd.cube(assignment.iter().map(|(&v, &b)| (v, b)));
            assert_eq!(bdd.restrict_law(fa, law), r);
        }
    }

    for a in sample(11) {
        for b in sample(17) {
            let (fa, fb) = (fs[a as usize], fs[b as usize]);
            for assignment in assignments.iter() {
                assert_eq!(
                    bdd.restrict_set(bdd.apply_and(fa, fb), assignment),
                    bdd.apply_and(
                        bdd.restrict_set(fa, assignment),
                        bdd.restrict_set(fb, assignment)
                    )
                );
                assert_eq!(
                    bdd.restrict_set(bdd.apply_or(fa, fb), assignment),
                    bdd.apply_or(
                        bdd.restrict_set(fa, assignment),
                        bdd.restrict_set(fb, assignment)
                    )
                );
            }
        }
    }
}

fn check_restrict_law<O: ItemOrder>(bdd: &Bdd<O>) {
    let fs = all_functions(bdd);

    for l in 0..=255u8 {
        let law = fs[l as usize];
        if l != 0x00 {
            assert_eq!(bdd.restrict_law(law, law), bdd.one());
        }
        if l != 0xFF {
            assert_eq!(bdd.restrict_law(bdd.apply_not(law), law), bdd.zero());
        }

        for a in sample(3) {
            let fa = fs[a as usize];
            let r = bdd.restrict_law(fa, law);
            assert!(bdd.is_well_formed(r));
            if l == 0x00 {
                assert_eq!(r, bdd.zero());
            } else {
                // Agrees with `fa` wherever the law holds.
                assert_eq!(bdd.apply_and(law, r), bdd.apply_and(law, fa));
                let union = &bdd.support(fa) | &bdd.support(law);
                assert!(bdd.support(r).is_subset(&union));
            }
        }
    }

    for a in 0..=255u8 {
        let fa = fs[a as usize];
        assert_eq!(bdd.restrict_law(fa, bdd.one()), fa);
    }
}

fn check_subst<O: ItemOrder>(bdd: &Bdd<O>) {
    let fs = all_functions(bdd);

    for a in 0..=255u8 {
        let fa = fs[a as usize];
        for v in VARS {
            assert_eq!(bdd.subst(fa, v, bdd.mk_var(v)), fa);
            for b in [false, true] {
                assert_eq!(bdd.subst(fa, v, bdd.constant(b)), bdd.restrict(fa, v, b));
            }

            for g in sample(11) {
                let fg = fs[g as usize];
                let r = bdd.subst(fa, v, fg);
                let expected = from_bits(|m| bit(a, with_value(m, v, bit(g, m))));
                assert_eq!(r, fs[expected as usize]);

                let ite = bdd.apply_or(
                    bdd.apply_and(fg, bdd.restrict(fa, v, true)),
                    bdd.apply_and(bdd.apply_not(fg), bdd.restrict(fa, v, false)),
                );
                assert_eq!(r, ite);

                if !depends_on(a, v) {
                    assert_eq!(r, fa);
                }
            }
        }
    }
}

/// Tables of the replacements used for simultaneous substitution.
const REPLACEMENTS: [u8; 10] = [0x00, 0xFF, 0xAA, 0xCC, 0xF0, 0x55, 0x66, 0xE8, 0x96, 0x1E];

fn check_subst_set<O: ItemOrder>(bdd: &Bdd<O>) {
    let fs = all_functions(bdd);

    for (i, a) in sample(3).enumerate() {
        let fa = fs[a as usize];
        assert_eq!(bdd.subst_set(fa, &HashMap::new()), fa);

        for mask in 1..8u32 {
            let keys = VARS
                .into_iter()
                .filter(|&v| mask & (1 << (v - 1)) != 0)
                .collect::<Vec<_>>();

            for j in 0..REPLACEMENTS.len() {
                let tables = keys
                    .iter()
                    .map(|&v| {
                        let k = (j + v as usize * (i + 1)) % REPLACEMENTS.len();
                        (v, REPLACEMENTS[k])
                    })
                    .collect::<HashMap<_, _>>();
                let replacements = tables
                    .iter()
                    .map(|(&v, &t)| (v, fs[t as usize]))
                    .collect::<HashMap<_, _>>();

                let r = bdd.subst_set(fa, &replacements);
                let expected = from_bits(|m| {
                    let m = tables
                        .iter()
                        .fold(m, |acc, (&v, &t)| with_value(acc, v, bit(t, m)));
                    bit(a, m)
                });
                assert_eq!(
                    r,
                    fs[expected as usize],
                    "f = {:#04x}, replacements = {:?}",
                    a,
                    tables
                );
                assert!(bdd.is_well_formed(r));
            }
        }
    }

    for a in 0..=255u8 {
        let fa = fs[a as usize];

        // Single replacement is plain substitution.
        for v in VARS {
            for g in sample(51) {
                let fg = fs[g as usize];
                assert_eq!(
                    bdd.subst_set(fa, &HashMap::from([(v, fg)])),
                    bdd.subst(fa, v, fg)
                );
            }
        }

        // Constant replacements are cofactors.
        for assignment in partial_assignments() {
            let replacements = assignment
                .iter()
                .map(|(&v, &b)| (v, bdd.constant(b)))
                .collect::<HashMap<_, _>>();
            assert_eq!(
                bdd.subst_set(fa, &replacements),
                bdd.restrict_set(fa, &assignment)
            );
        }

        // Permutations of the variables.
        for perm in [[1, 2, 3], [2, 1, 3], [1, 3, 2], [3, 2, 1], [2, 3, 1], [3, 1, 2]] {
            let replacements = VARS
                .into_iter()
                .map(|v| (v, bdd.mk_var(perm[(v - 1) as usize])))
                .collect::<HashMap<_, _>>();
            let expected = from_bits(|m| {
                let m = pack(3, |k| value(m, perm[k as usize]));
                bit(a, m)
            });
            assert_eq!(bdd.subst_set(fa, &replacements), fs[expected as usize]);
        }
    }
}

fn check_fold_and_count<O: ItemOrder>(bdd: &Bdd<O>) {
    let fs = all_functions(bdd);

    for a in 0..=255u8 {
        let fa = fs[a as usize];

        let describe = |v: u32, l: &String, h: &String| format!("{}?{}:{}", v, h, l);
        let lazy = bdd.fold(fa, "0".to_string(), "1".to_string(), describe);
        let strict = bdd.fold_strict(fa, "0".to_string(), "1".to_string(), describe);
        assert_eq!(lazy, strict);

        assert_eq!(bdd.sat_count(fa, 3), BigUint::from(a.count_ones()));
        match bdd.one_sat(fa) {
            None => assert_eq!(a, 0),
            Some(path) => {
                let m = path
                    .iter()
                    .fold(0u8, |m, &(v, b)| with_value(m, v, b));
                assert!(bit(a, m), "{:?} does not satisfy {:#04x}", path, a);
            }
        }

        for b in sample(19) {
            let fb = fs[b as usize];
            assert_eq!(bdd.is_implies(fa, fb), a & !b == 0);
        }
    }
}

fn config() -> BddConfig {
    BddConfig::default()
        .with_storage_bits(10)
        .with_cache_bits(4)
}

macro_rules! laws {
    ($($name:ident => $order:expr;)*) => {
        $(
            mod $name {
                use test_log::test;

                use super::*;

                fn manager() -> Bdd<impl ItemOrder> {
                    Bdd::with_config_and_order(config(), $order)
                }

                #[test]
                fn canonical() {
                    check_canonical(&manager());
                }

                #[test]
                fn operations() {
                    check_operations(&manager());
                }

                #[test]
                fn support_and_evaluate() {
                    check_support_and_evaluate(&manager());
                }

                #[test]
                fn restrict() {
                    check_restrict(&manager());
                }

                #[test]
                fn restrict_set() {
                    check_restrict_set(&manager());
                }

                #[test]
                fn restrict_law() {
                    check_restrict_law(&manager());
                }

                #[test]
                fn subst() {
                    check_subst(&manager());
                }

                #[test]
                fn subst_set() {
                    check_subst_set(&manager());
                }

                #[test]
                fn fold_and_count() {
                    check_fold_and_count(&manager());
                }
            }
        )*
    };
}

laws! {
    natural => NaturalOrder;
    reverse => ReverseOrder;
    ranked => CustomOrder::from_ranking(&[2, 3, 1]);
    odd_first => CustomOrder::new(|i: u32, j: u32| (i % 2 == 0, i).cmp(&(j % 2 == 0, j)));
}

#[test]
fn test_conjunction_truth_table() {
    let bdd = Bdd::default();

    let f = bdd.apply_and(bdd.mk_var(1), bdd.mk_var(2));
    for a in [false, true] {
        for b in [false, true] {
            let valuation = |v: u32| if v == 1 { a } else { b };
            assert_eq!(bdd.evaluate(f, valuation), a && b);
        }
    }
}

#[test]
fn test_var_table_matches_mk_var() {
    let bdd = Bdd::default();
    for v in VARS {
        assert_eq!(build(&bdd, var_table(v)), bdd.mk_var(v));
    }
}
