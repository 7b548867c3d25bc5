
use crate::data_types::family::Sex;

use serde::Serialize;

/// The variant classes we distinguish, derived from allele lengths
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub enum VariantType {
    /// REF and ALT are both length = 1
    Snv=0,
    /// REF length = 1, ALT length > 1
    Insertion,
    /// REF length > 1, ALT length = 1
    Deletion,
    /// REF and ALT lengths > 1
    Indel
}

/// The three members of a sequenced trio
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, strum_macros::Display)]
pub enum SampleRole {
    #[strum(serialize = "child")]
    Child,
    #[strum(serialize = "father")]
    Father,
    #[strum(serialize = "mother")]
    Mother
}

#[derive(thiserror::Error, Debug)]
pub enum VariantError {
    #[error("ref allele is empty (length = 0)")]
    EmptyRefAllele,
    #[error("alt allele is empty (length = 0)")]
    EmptyAltAllele,
    #[error("person identifier is empty")]
    EmptyPersonId
}

/// Forward/reverse read counts supporting the reference and alternate alleles for one sample
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct AlleleStrandCounts {
    /// reference-matching reads on the forward strand
    pub ref_fwd: u32,
    /// reference-matching reads on the reverse strand
    pub ref_rev: u32,
    /// alternate-matching reads on the forward strand
    pub alt_fwd: u32,
    /// alternate-matching reads on the reverse strand
    pub alt_rev: u32
}

impl AlleleStrandCounts {
    pub fn new(ref_fwd: u32, ref_rev: u32, alt_fwd: u32, alt_rev: u32) -> AlleleStrandCounts {
        AlleleStrandCounts { ref_fwd, ref_rev, alt_fwd, alt_rev }
    }

    /// Total reads supporting the reference allele
    pub fn ref_total(&self) -> u32 {
        self.ref_fwd + self.ref_rev
    }

    /// Total reads supporting the alternate allele
    pub fn alt_total(&self) -> u32 {
        self.alt_fwd + self.alt_rev
    }

    /// Total read depth over both alleles and strands
    pub fn depth(&self) -> u32 {
        self.ref_total() + self.alt_total()
    }
}

/// A candidate de novo variant call for one child, with optional per-sample strand counts.
/// A (family, chrom, pos, ref, alt) tuple identifies a single locus event.
#[derive(Clone, Debug, PartialEq)]
pub struct DeNovoVariant {
    /// stable identifier of the child the call was made in
    person_id: String,
    /// sex of the child, used to join against the family map
    sex: Sex,
    /// the chromosome label
    chrom: String,
    /// the coordinate of the call on the chromosome
    pos: u64,
    /// the reference allele sequence
    ref_allele: String,
    /// the alternate allele sequence
    alt_allele: String,
    /// the annotated gene symbol
    symbol: String,
    /// the annotated VEP consequence
    consequence: String,
    /// maximum population allele frequency
    max_af: f64,
    /// posterior probability of the de novo call
    pp_dnm: f64,
    /// strand counts for the child, if the input table carried them
    child_counts: Option<AlleleStrandCounts>,
    /// strand counts for the father, if the input table carried them
    father_counts: Option<AlleleStrandCounts>,
    /// strand counts for the mother, if the input table carried them
    mother_counts: Option<AlleleStrandCounts>
}

impl DeNovoVariant {
    /// Creates a new de novo variant call with no attached allele counts.
    /// # Arguments
    /// * `person_id` - stable identifier for the child
    /// * `sex` - sex of the child
    /// * `chrom` - chromosome label
    /// * `pos` - coordinate on the chromosome
    /// * `ref_allele` - reference allele sequence
    /// * `alt_allele` - alternate allele sequence
    /// * `symbol` - annotated gene symbol
    /// * `consequence` - annotated VEP consequence
    /// * `max_af` - maximum population allele frequency
    /// * `pp_dnm` - posterior probability of the de novo call
    /// # Errors
    /// * if either allele sequence is empty
    /// * if the person identifier is empty
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        person_id: String, sex: Sex, chrom: String, pos: u64,
        ref_allele: String, alt_allele: String,
        symbol: String, consequence: String,
        max_af: f64, pp_dnm: f64
    ) -> Result<DeNovoVariant, VariantError> {
        if person_id.is_empty() {
            return Err(VariantError::EmptyPersonId);
        }
        if ref_allele.is_empty() {
            return Err(VariantError::EmptyRefAllele);
        }
        if alt_allele.is_empty() {
            return Err(VariantError::EmptyAltAllele);
        }

        Ok(DeNovoVariant {
            person_id,
            sex,
            chrom,
            pos,
            ref_allele,
            alt_allele,
            symbol,
            consequence,
            max_af,
            pp_dnm,
            child_counts: None,
            father_counts: None,
            mother_counts: None
        })
    }

    /// Attaches strand counts for all three trio members, consuming and returning the variant.
    pub fn with_trio_counts(
        mut self,
        child: AlleleStrandCounts,
        father: AlleleStrandCounts,
        mother: AlleleStrandCounts
    ) -> DeNovoVariant {
        self.child_counts = Some(child);
        self.father_counts = Some(father);
        self.mother_counts = Some(mother);
        self
    }

    /// Sets the strand counts for a single trio member.
    pub fn set_sample_counts(&mut self, role: SampleRole, counts: AlleleStrandCounts) {
        match role {
            SampleRole::Child => self.child_counts = Some(counts),
            SampleRole::Father => self.father_counts = Some(counts),
            SampleRole::Mother => self.mother_counts = Some(counts)
        };
    }

    /// Returns the strand counts for a trio member, if present.
    pub fn sample_counts(&self, role: SampleRole) -> Option<&AlleleStrandCounts> {
        match role {
            SampleRole::Child => self.child_counts.as_ref(),
            SampleRole::Father => self.father_counts.as_ref(),
            SampleRole::Mother => self.mother_counts.as_ref()
        }
    }

    /// Classifies the call from the allele lengths.
    pub fn variant_type(&self) -> VariantType {
        match (self.ref_allele.len(), self.alt_allele.len()) {
            (1, 1) => VariantType::Snv,
            (1, _) => VariantType::Insertion,
            (_, 1) => VariantType::Deletion,
            (_, _) => VariantType::Indel
        }
    }

    /// Returns true if either allele is longer than a single base.
    pub fn is_indel(&self) -> bool {
        self.variant_type() != VariantType::Snv
    }

    // getters
    pub fn person_id(&self) -> &str {
        &self.person_id
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn pos(&self) -> u64 {
        self.pos
    }

    pub fn ref_allele(&self) -> &str {
        &self.ref_allele
    }

    pub fn alt_allele(&self) -> &str {
        &self.alt_allele
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn consequence(&self) -> &str {
        &self.consequence
    }

    pub fn max_af(&self) -> f64 {
        self.max_af
    }

    pub fn pp_dnm(&self) -> f64 {
        self.pp_dnm
    }
}
