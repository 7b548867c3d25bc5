
use crate::allele_counts::{CountsError, extract_trio_counts, get_recurrent_genes};
use crate::bias_tests::{test_genes, test_sites};
use crate::config::FilterConfig;
use crate::data_types::variants::DeNovoVariant;
use crate::depth_threshold::DepthThresholdModel;

use log::debug;
use serde::Serialize;

/// Everything the filter decided about one variant, in input order.
/// These are produced as a side artifact of the run itself, so callers can
/// audit the per-test values without re-running anything.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SiteOutcome {
    /// stable identifier of the child the call was made in
    pub person_id: String,
    /// the chromosome label
    pub chrom: String,
    /// the coordinate of the call
    pub pos: u64,
    /// strand bias p-value for the child's reads
    pub strand_bias_p: f64,
    /// site-level parental deviation p-value
    pub parental_site_p: f64,
    /// gene-level pooled parental deviation p-value
    pub parental_gene_p: f64,
    /// how many parental alt reads sequencing error can explain at this site
    pub parental_alt_threshold: u64,
    /// whether the variant cleared the read depth gate
    pub depth_ok: bool,
    /// site-level parental deviation below the cutoff
    pub site_fail: bool,
    /// gene-level deviation below the cutoff in a recurrently hit gene
    pub gene_fail: bool,
    /// more alt reads in both parents than the depth threshold allows
    pub excess_alts: bool,
    /// the final decision for this variant
    pub overall_pass: bool
}

/// The outcome table for one filtering run.
#[derive(Clone, Debug, Default)]
pub struct FilterSummary {
    outcomes: Vec<SiteOutcome>
}

impl FilterSummary {
    /// Per-variant outcome records, in input order
    pub fn outcomes(&self) -> &[SiteOutcome] {
        &self.outcomes
    }

    /// The final pass/fail decision per variant, in input order
    pub fn pass_vector(&self) -> Vec<bool> {
        self.outcomes.iter().map(|outcome| outcome.overall_pass).collect()
    }

    /// Consumes the summary, yielding the outcome records
    pub fn into_outcomes(self) -> Vec<SiteOutcome> {
        self.outcomes
    }
}

/// Applies the depth gate, the three independent filter classes, and the
/// majority-vote rule to a table of candidate de novo calls.
pub struct SiteFilterEngine {
    /// shared statistical constants for the run
    config: FilterConfig,
    /// binomial model for parental alt reads attributable to error
    depth_model: DepthThresholdModel
}

impl SiteFilterEngine {
    /// Creates a new engine after validating the supplied constants.
    /// # Arguments
    /// * `config` - significance cutoff and error rate for the run
    /// # Errors
    /// * if either constant is outside the open interval (0, 1)
    pub fn new(config: FilterConfig) -> Result<SiteFilterEngine, Box<dyn std::error::Error>> {
        config.validate()?;
        let depth_model = DepthThresholdModel::new(&config);
        Ok(SiteFilterEngine { config, depth_model })
    }

    /// Decides pass/fail for every variant in the table.
    ///
    /// A variant must clear the depth gate (more than one alt read and depth
    /// over 7 in the child, depth over 5 in each parent). SNVs must also show
    /// acceptable strand balance; indels are exempt from that check. On top of
    /// that, a variant is failed when at least two of the three parental
    /// deviation classes fire: site-level deviation, gene-level deviation in a
    /// recurrently hit gene, or more alt reads in both parents than the depth
    /// threshold model tolerates.
    ///
    /// `initial_status` marks rows already failed by upstream checks; those
    /// rows are kept out of the gene-level pooling, but the returned decisions
    /// are not masked by it, matching the gate-only semantics of the final
    /// depth re-check.
    /// # Arguments
    /// * `de_novos` - the candidate variant table
    /// * `initial_status` - optional upstream pass vector, same length and order
    /// # Errors
    /// * if any row is missing trio allele counts
    /// # Panics
    /// * if `initial_status` is provided with a different length than `de_novos`
    pub fn evaluate(
        &self,
        de_novos: &[DeNovoVariant],
        initial_status: Option<&[bool]>
    ) -> Result<FilterSummary, CountsError> {
        if let Some(status) = initial_status {
            assert_eq!(status.len(), de_novos.len());
        }
        let row_count = de_novos.len();

        let counts = extract_trio_counts(de_novos)?;
        let recurrent = get_recurrent_genes(de_novos);
        debug!("{} genes have recurrent calls", recurrent.len());

        // sites need good sample depths (different threshold for child and
        // parents) and more than a single alt read in the child
        let good_depth: Vec<bool> = counts.iter()
            .map(|row| {
                row.child_alts() > 1 && row.child_depth() > 7 &&
                    row.dad_depth() > 5 && row.mom_depth() > 5
            })
            .collect();
        let gated = good_depth.iter().filter(|&&ok| !ok).count();
        debug!("{} of {} variants fail the depth gate", gated, row_count);

        let site_p_values = test_sites(&counts);

        // gene pooling only draws on rows that pass the strand bias check, the
        // depth gate, and any upstream status
        let include: Vec<bool> = (0..row_count)
            .map(|i| {
                site_p_values[i].strand_bias >= self.config.p_cutoff &&
                    good_depth[i] &&
                    initial_status.map_or(true, |status| status[i])
            })
            .collect();
        let gene_p_values = test_genes(de_novos, &counts, &include);

        let mut outcomes: Vec<SiteOutcome> = Vec::with_capacity(row_count);
        for (i, variant) in de_novos.iter().enumerate() {
            let row = &counts[i];
            let threshold = self.depth_model.parental_threshold(
                row.dad_depth() as u64, row.mom_depth() as u64);

            let site_fail = site_p_values[i].parental_site_bias < self.config.p_cutoff;
            let gene_fail = gene_p_values[i] < self.config.p_cutoff &&
                recurrent.contains(variant.symbol());
            let excess_alts = row.min_parent_alt() as u64 > threshold;

            // SNVs with excessive strand bias fail outright; indels skip the
            // strand check entirely
            let mut overall_pass = site_p_values[i].strand_bias >= self.config.p_cutoff ||
                variant.is_indel();

            // exclude sites that fail two of the three parental classes
            let fail_classes = usize::from(site_fail) + usize::from(gene_fail) + usize::from(excess_alts);
            if fail_classes >= 2 {
                overall_pass = false;
            }

            // the depth gate dominates every other outcome
            overall_pass &= good_depth[i];

            outcomes.push(SiteOutcome {
                person_id: variant.person_id().to_string(),
                chrom: variant.chrom().to_string(),
                pos: variant.pos(),
                strand_bias_p: site_p_values[i].strand_bias,
                parental_site_p: site_p_values[i].parental_site_bias,
                parental_gene_p: gene_p_values[i],
                parental_alt_threshold: threshold,
                depth_ok: good_depth[i],
                site_fail,
                gene_fail,
                excess_alts,
                overall_pass
            });
        }

        let passed = outcomes.iter().filter(|outcome| outcome.overall_pass).count();
        debug!("{} of {} variants pass filtering", passed, row_count);
        Ok(FilterSummary { outcomes })
    }
}
