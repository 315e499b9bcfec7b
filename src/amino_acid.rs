use std::fmt;

use crate::alphabet::Symbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AminoAcid {
    Alanine,
    Arginine,
    Asparagine,
    AsparticAcid,
    Cysteine,
    GlutamicAcid,
    Glutamine,
    Glycine,
    Histidine,
    Isoleucine,
    Leucine,
    Lysine,
    Methionine,
    Phenylalanine,
    Proline,
    Serine,
    Threonine,
    Tryptophan,
    Tyrosine,
    Valine,
}

/// Side-chain groups used to judge whether a substitution is conservative.
/// Every standard amino acid belongs to exactly one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResidueGroup {
    Aliphatic,
    Aromatic,
    Acidic,
    Basic,
    PolarUncharged,
    Special,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Conservativeness {
    Conservative,
    NonConservative,
}

impl fmt::Display for Conservativeness {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let string = match self {
            Self::Conservative => "Conservative",
            Self::NonConservative => "Non-Conservative",
        };
        write!(f, "{}", string)
    }
}

const ONE_LETTER_CODE: [Option<AminoAcid>; 26] = [
    Some(AminoAcid::Alanine),       //A
    None,                           //B (D or N)
    Some(AminoAcid::Cysteine),      //C
    Some(AminoAcid::AsparticAcid),  //D
    Some(AminoAcid::GlutamicAcid),  //E
    Some(AminoAcid::Phenylalanine), //F
    Some(AminoAcid::Glycine),       //G
    Some(AminoAcid::Histidine),     //H
    Some(AminoAcid::Isoleucine),    //I
    None,                           //J (I or L)
    Some(AminoAcid::Lysine),        //K
    Some(AminoAcid::Leucine),       //L
    Some(AminoAcid::Methionine),    //M
    Some(AminoAcid::Asparagine),    //N
    None,                           //O (pyrrolysine)
    Some(AminoAcid::Proline),       //P
    Some(AminoAcid::Glutamine),     //Q
    Some(AminoAcid::Arginine),      //R
    Some(AminoAcid::Serine),        //S
    Some(AminoAcid::Threonine),     //T
    None,                           //U (selenocysteine)
    Some(AminoAcid::Valine),        //V
    Some(AminoAcid::Tryptophan),    //W
    None,                           //X
    Some(AminoAcid::Tyrosine),      //Y
    None,                           //Z (E or Q)
];

impl AminoAcid {
    /// Look up one of the 20 standard amino acids. Ambiguity codes, stops and
    /// gaps have no amino acid.
    pub fn from_symbol(symbol: Symbol) -> Option<AminoAcid> {
        match symbol.as_byte() {
            letter @ b'A'..=b'Z' => ONE_LETTER_CODE[(letter - b'A') as usize],
            _ => None,
        }
    }

    pub fn group(&self) -> ResidueGroup {
        match self {
            Self::Alanine | Self::Valine | Self::Leucine | Self::Isoleucine | Self::Methionine => {
                ResidueGroup::Aliphatic
            }
            Self::Phenylalanine | Self::Tyrosine | Self::Tryptophan => ResidueGroup::Aromatic,
            Self::AsparticAcid | Self::GlutamicAcid => ResidueGroup::Acidic,
            Self::Lysine | Self::Arginine | Self::Histidine => ResidueGroup::Basic,
            Self::Serine | Self::Threonine | Self::Asparagine | Self::Glutamine => {
                ResidueGroup::PolarUncharged
            }
            Self::Glycine | Self::Proline | Self::Cysteine => ResidueGroup::Special,
        }
    }
}

/// Classify the substitution of `original` by `mutated`
///
/// The substitution is conservative if both residues are standard amino
/// acids of the same `ResidueGroup`. Anything else, including ambiguity codes
/// and stops, is non-conservative.
pub fn classify_substitution(original: Symbol, mutated: Symbol) -> Conservativeness {
    let original_group = AminoAcid::from_symbol(original).map(|aa| aa.group());
    let mutated_group = AminoAcid::from_symbol(mutated).map(|aa| aa.group());
    match (original_group, mutated_group) {
        (Some(a), Some(b)) if a == b => Conservativeness::Conservative,
        _ => Conservativeness::NonConservative,
    }
}
