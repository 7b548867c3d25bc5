
use lazy_static::lazy_static;
use rustc_hash::FxHashMap as HashMap;

/// VEP consequence categories ordered from most to least severe.
/// This is the fixed reference vocabulary used to pick a representative call
/// when one person has multiple calls in the same gene.
pub const DEFAULT_SEVERITY_ORDER: [&str; 37] = [
    "transcript_ablation", "splice_donor_variant",
    "splice_acceptor_variant", "stop_gained", "frameshift_variant",
    "initiator_codon_variant", "stop_lost", "start_lost", "transcript_amplification",
    "inframe_insertion", "inframe_deletion", "missense_variant", "protein_altering_variant",
    "splice_region_variant", "incomplete_terminal_codon_variant",
    "stop_retained_variant", "synonymous_variant", "coding_sequence_variant",
    "mature_miRNA_variant", "5_prime_UTR_variant", "3_prime_UTR_variant",
    "non_coding_exon_variant", "non_coding_transcript_exon_variant", "intron_variant",
    "NMD_transcript_variant", "non_coding_transcript_variant",
    "upstream_gene_variant", "downstream_gene_variant", "TFBS_ablation",
    "TFBS_amplification", "TF_binding_site_variant",
    "regulatory_region_ablation", "regulatory_region_amplification",
    "regulatory_region_variant", "feature_elongation", "feature_truncation",
    "intergenic_variant"
];

lazy_static! {
    /// Shared default ranking, built once from `DEFAULT_SEVERITY_ORDER`.
    static ref DEFAULT_RANKING: SeverityRanking = SeverityRanking::new(&DEFAULT_SEVERITY_ORDER);
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SeverityError {
    #[error("consequence {consequence:?} is not in the severity ranking")]
    UnknownConsequence { consequence: String },
    #[error("cannot pick the most severe consequence of an empty set")]
    EmptyConsequences
}

/// A total order over consequence categories, precomputed into a rank map so
/// lookups are O(1) instead of a scan of the ordered list per row.
#[derive(Clone, Debug)]
pub struct SeverityRanking {
    /// rank keyed by consequence, rank 0 is the most severe
    ranks: HashMap<String, usize>
}

impl SeverityRanking {
    /// Builds a ranking from a list ordered most severe first.
    pub fn new(ordered: &[&str]) -> SeverityRanking {
        let ranks = ordered.iter().enumerate()
            .map(|(rank, &consequence)| (consequence.to_string(), rank))
            .collect();
        SeverityRanking { ranks }
    }

    /// Returns the severity rank for a consequence, 0 being the most severe.
    /// # Errors
    /// * if the consequence is not in the known vocabulary
    pub fn rank(&self, consequence: &str) -> Result<usize, SeverityError> {
        self.ranks.get(consequence)
            .copied()
            .ok_or_else(|| SeverityError::UnknownConsequence { consequence: consequence.to_string() })
    }

    /// Picks the most severe consequence out of a set.
    /// # Errors
    /// * if the set is empty
    /// * if any consequence is not in the known vocabulary
    pub fn most_severe<'a>(&self, consequences: &[&'a str]) -> Result<&'a str, SeverityError> {
        let mut best: Option<(usize, &str)> = None;
        for &consequence in consequences {
            let rank = self.rank(consequence)?;
            if best.is_none() || rank < best.unwrap().0 {
                best = Some((rank, consequence));
            }
        }
        match best {
            Some((_rank, consequence)) => Ok(consequence),
            None => Err(SeverityError::EmptyConsequences)
        }
    }
}

impl Default for SeverityRanking {
    fn default() -> SeverityRanking {
        DEFAULT_RANKING.clone()
    }
}
