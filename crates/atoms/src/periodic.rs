/// Element symbols indexed by atomic number. Index 0 is the dummy atom.
pub const NUMBER_TO_SYMBOL: [&str; 119] = [
    "X", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg",
    "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn",
    "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Kr", "Rb",
    "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm",
    "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta",
    "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At",
    "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt",
    "Ds", "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// the largest atomic number in [NUMBER_TO_SYMBOL]
pub const MAX_Z: usize = NUMBER_TO_SYMBOL.len() - 1;

/// return the symbol for atomic number `z`, or `None` outside of [1, 118]
pub fn number_to_symbol(z: usize) -> Option<&'static str> {
    if z == 0 {
        return None;
    }
    NUMBER_TO_SYMBOL.get(z).copied()
}

/// return the atomic number for `s`, trying the symbol as given before
/// titlecasing it, so that `FE` and `fe` both resolve to iron
pub fn symbol_to_number(s: &str) -> Option<usize> {
    let s = s.trim();
    let find = |s: &str| NUMBER_TO_SYMBOL[1..].iter().position(|&x| x == s);
    find(s).or_else(|| find(&titlecase(s))).map(|i| i + 1)
}

pub(crate) fn titlecase(s: &str) -> String {
    let mut cs = s.chars();
    let Some(first) = cs.next() else {
        return String::new();
    };
    let mut ret = String::from(first).to_uppercase();
    for c in cs {
        ret.push_str(&c.to_lowercase().to_string());
    }
    ret
}

/// the spectroscopic letter for angular momentum quantum number `l`: s, p, d,
/// and then the alphabet from f onward up to `l = 12`
pub fn azimuthal_letter(l: usize) -> Option<char> {
    match l {
        0 => Some('s'),
        1 => Some('p'),
        2 => Some('d'),
        3..=12 => char::from_u32('f' as u32 + (l - 3) as u32),
        _ => None,
    }
}
