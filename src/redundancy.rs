
use crate::data_types::family::{FamilyMap, Sex};
use crate::data_types::severity::{SeverityError, SeverityRanking};
use crate::data_types::variants::DeNovoVariant;

use log::debug;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RedundancyError {
    #[error("no family id for person {person_id} ({sex})")]
    UnknownFamily { person_id: String, sex: Sex },
    #[error("consequence {consequence:?} for {person_id} in {symbol} is not in the severity ranking")]
    UnknownConsequence {
        person_id: String,
        symbol: String,
        consequence: String
    }
}

/// Removes variant calls that would double-count a single biological event:
/// calls shared between probands of one family, and calls recurrent within one
/// person in one gene.
#[derive(Clone, Debug, Default)]
pub struct RedundancyResolver {
    /// the consequence severity order used to pick a representative call
    severity: SeverityRanking
}

impl RedundancyResolver {
    pub fn new(severity: SeverityRanking) -> RedundancyResolver {
        RedundancyResolver { severity }
    }

    /// Runs both deduplication passes, preserving input order among survivors.
    /// Both passes are stateless grouping operations, so re-running on already
    /// deduplicated input returns it unchanged.
    /// # Arguments
    /// * `de_novos` - the candidate variant table
    /// * `families` - mapping from (person, sex) to family identifier
    /// # Errors
    /// * if any person is missing from the family map
    /// * if any consequence is missing from the severity ranking
    pub fn independent_de_novos(
        &self,
        de_novos: Vec<DeNovoVariant>,
        families: &FamilyMap
    ) -> Result<Vec<DeNovoVariant>, RedundancyError> {
        let unique = self.remove_family_duplicates(de_novos, families)?;
        self.remove_within_person_recurrences(unique)
    }

    /// Collapses the same locus event called independently in multiple probands
    /// of one family, retaining the first occurrence in input order.
    fn remove_family_duplicates(
        &self,
        de_novos: Vec<DeNovoVariant>,
        families: &FamilyMap
    ) -> Result<Vec<DeNovoVariant>, RedundancyError> {
        let initial_count = de_novos.len();
        let mut seen: HashSet<(String, String, u64, String, String)> = HashSet::default();
        let mut survivors: Vec<DeNovoVariant> = Vec::with_capacity(initial_count);
        for variant in de_novos.into_iter() {
            let family_id = match families.family_id(variant.person_id(), variant.sex()) {
                Some(family_id) => family_id.to_string(),
                None => {
                    return Err(RedundancyError::UnknownFamily {
                        person_id: variant.person_id().to_string(),
                        sex: variant.sex()
                    });
                }
            };

            let locus_event = (
                family_id,
                variant.chrom().to_string(),
                variant.pos(),
                variant.ref_allele().to_string(),
                variant.alt_allele().to_string()
            );
            if seen.insert(locus_event) {
                survivors.push(variant);
            }
        }

        debug!("family dedup removed {} of {} variants", initial_count - survivors.len(), initial_count);
        Ok(survivors)
    }

    /// Collapses calls recurrent within a single person in a single gene down
    /// to one event: the first call carrying the most severe consequence.
    fn remove_within_person_recurrences(
        &self,
        de_novos: Vec<DeNovoVariant>
    ) -> Result<Vec<DeNovoVariant>, RedundancyError> {
        // bucket row indices by (person, gene); any key holding more than one
        // row is a duplicate run, and this captures every member of the run
        let mut gene_rows: HashMap<(&str, &str), Vec<usize>> = HashMap::default();
        for (row_index, variant) in de_novos.iter().enumerate() {
            gene_rows.entry((variant.person_id(), variant.symbol()))
                .or_default()
                .push(row_index);
        }

        let mut exclude: Vec<bool> = vec![false; de_novos.len()];
        for ((person_id, symbol), row_indices) in gene_rows.iter() {
            if row_indices.len() < 2 {
                continue;
            }

            let consequences: Vec<&str> = row_indices.iter()
                .map(|&row_index| de_novos[row_index].consequence())
                .collect();
            let representative = self.severity.most_severe(&consequences)
                .map_err(|error| match error {
                    SeverityError::UnknownConsequence { consequence } => {
                        RedundancyError::UnknownConsequence {
                            person_id: person_id.to_string(),
                            symbol: symbol.to_string(),
                            consequence
                        }
                    },
                    // the run has at least two members, so the set is non-empty
                    SeverityError::EmptyConsequences => unreachable!()
                })?;

            // keep the first row with the representative consequence, in input order
            let keep = row_indices.iter()
                .copied()
                .find(|&row_index| de_novos[row_index].consequence() == representative)
                .unwrap();
            for &row_index in row_indices.iter() {
                exclude[row_index] = row_index != keep;
            }
        }

        let removed = exclude.iter().filter(|&&e| e).count();
        debug!("within-person gene recurrence removed {} of {} variants", removed, de_novos.len());

        Ok(de_novos.into_iter()
            .zip(exclude)
            .filter(|(_variant, excluded)| !excluded)
            .map(|(variant, _excluded)| variant)
            .collect())
    }
}
