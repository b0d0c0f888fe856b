//! Built-in materials.
//!
//! Coefficients are the published Sellmeier-type fits for $\lambda$ in µm:
//!
//! | Key | Material | Source |
//! |-----|----------|--------|
//! | `air` | Standard air | Ciddor, *Appl. Opt.* **35**, 1566 (1996) |
//! | `fs` | Fused silica | Malitson, *JOSA* **55**, 1205 (1965) |
//! | `mgf2` | MgF₂ (ordinary) | Dodge, *Appl. Opt.* **23**, 1980 (1984) |
//! | `sapphire_o` / `sapphire_e` | Al₂O₃ | Malitson & Dodge (1972) |
//! | `bbo_o` / `bbo_e` | β-BaB₂O₄ | Eimerl et al., *JAP* **62**, 1968 (1987) |

use crate::sellmeier::{DispersionFormula, GasTerm, SellmeierTerm};

fn sellmeier3(b: [f64; 3], resonance_um: [f64; 3]) -> DispersionFormula {
    DispersionFormula::Sellmeier(
        b.iter()
            .zip(resonance_um.iter())
            .map(|(&b, &l)| SellmeierTerm::new(b, l * l))
            .collect(),
    )
}

/// All built-in formulas keyed by catalog name.
pub fn builtin_formulas() -> Vec<(&'static str, DispersionFormula)> {
    vec![
        (
            "air",
            DispersionFormula::Gas(vec![
                GasTerm { b: 0.05792105, c: 238.0185 },
                GasTerm { b: 0.00167917, c: 57.362 },
            ]),
        ),
        (
            "fs",
            sellmeier3([0.6961663, 0.4079426, 0.8974794], [0.0684043, 0.1162414, 9.896161]),
        ),
        (
            "mgf2",
            sellmeier3([0.48755108, 0.39875031, 2.3120353], [0.04338408, 0.09461442, 23.793604]),
        ),
        (
            "sapphire_o",
            sellmeier3([1.4313493, 0.65054713, 5.3414021], [0.0726631, 0.1193242, 18.028251]),
        ),
        (
            "sapphire_e",
            sellmeier3([1.5039759, 0.55069141, 6.5927379], [0.0740288, 0.1216529, 20.072248]),
        ),
        (
            "bbo_o",
            DispersionFormula::Eimerl { a: 2.7405, b: 0.0184, c: 0.0179, d: 0.0155 },
        ),
        (
            "bbo_e",
            DispersionFormula::Eimerl { a: 2.3730, b: 0.0128, c: 0.0156, d: 0.0044 },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn formula(name: &str) -> DispersionFormula {
        builtin_formulas()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, f)| f)
            .unwrap()
    }

    #[test]
    fn test_air_index_near_unity() {
        let n = formula("air").index(0.8);
        assert!(n > 1.0002 && n < 1.0003, "air n(800 nm) = {}", n);
    }

    #[test]
    fn test_sapphire_birefringence_is_negative() {
        // Sapphire is negative uniaxial: n_e < n_o
        let n_o = formula("sapphire_o").index(0.8);
        let n_e = formula("sapphire_e").index(0.8);
        assert_abs_diff_eq!(n_o, 1.7601, epsilon = 1e-3);
        assert!(n_e < n_o);
    }

    #[test]
    fn test_bbo_indices_at_800nm() {
        assert_abs_diff_eq!(formula("bbo_o").index(0.8), 1.6614, epsilon = 1e-3);
        assert_abs_diff_eq!(formula("bbo_e").index(0.8), 1.5462, epsilon = 1e-3);
    }
}
