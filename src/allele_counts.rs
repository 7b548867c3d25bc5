
use crate::data_types::variants::{AlleleStrandCounts, DeNovoVariant, SampleRole};

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use serde::Serialize;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CountsError {
    #[error("variant {person_id} {chrom}:{pos} is missing {role} allele counts")]
    MissingCounts {
        person_id: String,
        chrom: String,
        pos: u64,
        role: SampleRole
    }
}

/// The per-trio counts derived for one variant row, recomputed per filtering run.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct CountsRow {
    /// the child's strand counts
    child: AlleleStrandCounts,
    /// the father's strand counts
    father: AlleleStrandCounts,
    /// the mother's strand counts
    mother: AlleleStrandCounts
}

impl CountsRow {
    pub fn new(child: AlleleStrandCounts, father: AlleleStrandCounts, mother: AlleleStrandCounts) -> CountsRow {
        CountsRow { child, father, mother }
    }

    pub fn child(&self) -> &AlleleStrandCounts {
        &self.child
    }

    pub fn father(&self) -> &AlleleStrandCounts {
        &self.father
    }

    pub fn mother(&self) -> &AlleleStrandCounts {
        &self.mother
    }

    /// Total alternate reads observed in the child
    pub fn child_alts(&self) -> u32 {
        self.child.alt_total()
    }

    /// Total read depth in the child
    pub fn child_depth(&self) -> u32 {
        self.child.depth()
    }

    /// Total read depth in the father
    pub fn dad_depth(&self) -> u32 {
        self.father.depth()
    }

    /// Total read depth in the mother
    pub fn mom_depth(&self) -> u32 {
        self.mother.depth()
    }

    /// Combined alternate reads across both parents
    pub fn parental_alts(&self) -> u32 {
        self.father.alt_total() + self.mother.alt_total()
    }

    /// Combined reference reads across both parents
    pub fn parental_refs(&self) -> u32 {
        self.father.ref_total() + self.mother.ref_total()
    }

    /// The smaller of the two parents' alternate read counts
    pub fn min_parent_alt(&self) -> u32 {
        self.father.alt_total().min(self.mother.alt_total())
    }
}

/// Pulls the forward/reverse ref and alt counts for child, father, and mother
/// out of each variant row.
/// # Arguments
/// * `de_novos` - the candidate variant table
/// # Errors
/// * if any row lacks counts for any of the three trio members, identifying the
///   row and the missing member
pub fn extract_trio_counts(de_novos: &[DeNovoVariant]) -> Result<Vec<CountsRow>, CountsError> {
    let mut counts: Vec<CountsRow> = Vec::with_capacity(de_novos.len());
    for variant in de_novos.iter() {
        let require = |role: SampleRole| {
            variant.sample_counts(role)
                .copied()
                .ok_or_else(|| CountsError::MissingCounts {
                    person_id: variant.person_id().to_string(),
                    chrom: variant.chrom().to_string(),
                    pos: variant.pos(),
                    role
                })
        };
        counts.push(CountsRow::new(
            require(SampleRole::Child)?,
            require(SampleRole::Father)?,
            require(SampleRole::Mother)?
        ));
    }
    Ok(counts)
}

/// Returns the set of gene symbols with more than one variant call in the table.
/// Genes with a single call cannot show gene-specific bias and are exempt from
/// the gene-level filter, which is why the orchestrator needs this set.
pub fn get_recurrent_genes(de_novos: &[DeNovoVariant]) -> HashSet<String> {
    let mut gene_counts: HashMap<&str, usize> = HashMap::default();
    for variant in de_novos.iter() {
        *gene_counts.entry(variant.symbol()).or_insert(0) += 1;
    }

    gene_counts.into_iter()
        .filter(|&(_symbol, count)| count > 1)
        .map(|(symbol, _count)| symbol.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_types::family::Sex;

    fn build_variant(person_id: &str, symbol: &str, pos: u64) -> DeNovoVariant {
        DeNovoVariant::new(
            person_id.to_string(), Sex::Female, "2".to_string(), pos,
            "G".to_string(), "C".to_string(),
            symbol.to_string(), "missense_variant".to_string(),
            0.0, 0.99
        ).unwrap()
    }

    fn build_counted_variant(person_id: &str, symbol: &str, pos: u64) -> DeNovoVariant {
        build_variant(person_id, symbol, pos).with_trio_counts(
            AlleleStrandCounts::new(10, 11, 6, 7),
            AlleleStrandCounts::new(15, 14, 1, 0),
            AlleleStrandCounts::new(12, 13, 0, 2)
        )
    }

    #[test]
    fn test_extracted_totals() {
        let de_novos = vec![build_counted_variant("p1", "GENE1", 100)];
        let counts = extract_trio_counts(&de_novos).unwrap();
        assert_eq!(counts.len(), 1);

        let row = &counts[0];
        assert_eq!(row.child_alts(), 13);
        assert_eq!(row.child_depth(), 34);
        assert_eq!(row.dad_depth(), 30);
        assert_eq!(row.mom_depth(), 27);
        assert_eq!(row.parental_alts(), 3);
        assert_eq!(row.parental_refs(), 54);
        assert_eq!(row.min_parent_alt(), 1);
    }

    #[test]
    fn test_missing_counts_is_schema_error() {
        // father counts never attached
        let mut variant = build_variant("p1", "GENE1", 100);
        variant.set_sample_counts(SampleRole::Child, AlleleStrandCounts::new(10, 10, 5, 5));
        variant.set_sample_counts(SampleRole::Mother, AlleleStrandCounts::new(10, 10, 0, 0));

        let result = extract_trio_counts(&[variant]);
        assert_eq!(result, Err(CountsError::MissingCounts {
            person_id: "p1".to_string(),
            chrom: "2".to_string(),
            pos: 100,
            role: SampleRole::Father
        }));
    }

    #[test]
    fn test_recurrent_genes() {
        let de_novos = vec![
            build_counted_variant("p1", "GENE1", 100),
            build_counted_variant("p2", "GENE1", 200),
            build_counted_variant("p3", "GENE2", 300),
            build_counted_variant("p4", "GENE3", 400),
            build_counted_variant("p5", "GENE3", 500),
            build_counted_variant("p6", "GENE3", 600)
        ];

        let recurrent = get_recurrent_genes(&de_novos);
        assert!(recurrent.contains("GENE1"));
        assert!(recurrent.contains("GENE3"));
        // a gene with exactly one call is excluded
        assert!(!recurrent.contains("GENE2"));
        assert_eq!(recurrent.len(), 2);
    }

    #[test]
    fn test_recurrent_genes_empty_input() {
        assert!(get_recurrent_genes(&[]).is_empty());
    }
}
