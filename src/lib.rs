
/// Derives per-sample allele counts from variant rows and finds recurrently hit genes
pub mod allele_counts;
/// The tunable statistical constants shared by all filters
pub mod config;
/// Contains multiple wrappers for useful data types in triosift
pub mod data_types;
/// Binomial model for how many parental alt reads sequencing error can explain
pub mod depth_threshold;
/// Fisher's exact test for 2x2 contingency tables
pub mod fisher;
/// Removal of variant calls that would double-count one biological event
pub mod redundancy;
/// Organizes the primary filtering workflow including depth gating, the deviation tests, and the majority-vote decision
pub mod site_filter;
