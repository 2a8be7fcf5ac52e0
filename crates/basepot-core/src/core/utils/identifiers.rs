use phf::{Set, phf_set};

/// Names of the backbone atom that stands in for a whole nucleotide.
///
/// `C3*` is the pre-remediation PDB spelling of `C3'`.
static REPRESENTATIVE_ATOM_NAMES: Set<&'static str> = phf_set! {
    "C3'", "C3*",
};

pub fn is_representative_atom(atom_name: &str) -> bool {
    REPRESENTATIVE_ATOM_NAMES.contains(atom_name.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_representative_atom_recognizes_c3_prime() {
        assert!(is_representative_atom("C3'"));
        assert!(is_representative_atom(" C3'"));
        assert!(is_representative_atom("C3*"));
    }

    #[test]
    fn is_representative_atom_rejects_other_backbone_atoms() {
        assert!(!is_representative_atom("C4'"));
        assert!(!is_representative_atom("P"));
        assert!(!is_representative_atom("C3"));
        assert!(!is_representative_atom("c3'"));
    }
}
