use itertools::Itertools;
use varisat::Lit;

fn invert(lit: Lit) -> Lit {
    match lit.is_negative() {
        true => lit.var().positive(),
        false => lit.var().negative(),
    }
}

pub(crate) fn exactly_one(vars: Vec<Lit>) -> Vec<Vec<Lit>> {
    let mut clauses = Vec::with_capacity(vars.len() * vars.len().saturating_sub(1) / 2 + 1);

    // no two are true; (!A + !B) * (!A + !C) * ...
    clauses.extend(vars.iter()
        .tuple_combinations()
        .map(|(a, b)| vec![invert(*a), invert(*b)])
    );
    // at least one is true; A + B + C + ...
    clauses.push(vars);

    clauses
}

/// `gate` implies that exactly two of `links` are true; each link implies `gate`.
///
/// With `gate` false, this forces every link false.
pub(crate) fn none_or_exactly_two(gate: Lit, links: &[Lit]) -> Vec<Vec<Lit>> {
    let mut clauses = Vec::new();

    // L => G, i.e. !L + G
    clauses.extend(links.iter().map(|link| vec![invert(*link), gate]));

    // G => at least one L
    clauses.push([invert(gate)].into_iter().chain(links.iter().copied()).collect_vec());

    // any one L true implies another is; L_1 => L_2 + L_3 + ...
    clauses.extend(links.iter().map(|chosen| links.iter()
        .map(|link| if link == chosen { invert(*link) } else { *link })
        .collect_vec()
    ));

    // no three are true at once
    clauses.extend(links.iter()
        .tuple_combinations()
        .map(|(a, b, c)| vec![invert(*a), invert(*b), invert(*c)])
    );

    clauses
}
