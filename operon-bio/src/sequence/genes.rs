//! The ordered set of genes a cluster must contain.

use operon_core::{normalize_genes, OperonError, OperonResult};
use serde::Serialize;

/// Required gene names, lower-cased and unique, in caller order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequiredGenes {
    genes: Vec<String>,
}

impl RequiredGenes {
    pub fn new<S: AsRef<str>>(genes: &[S]) -> OperonResult<Self> {
        let genes = normalize_genes(genes);
        if genes.is_empty() {
            return Err(OperonError::InvalidInput(
                "at least one required gene must be given".to_string(),
            ));
        }
        Ok(Self { genes })
    }

    pub fn as_slice(&self) -> &[String] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.genes.iter().map(String::as_str)
    }

    /// Genes occurring as a substring of an already lower-cased `product`
    pub fn matches_in<'a>(&'a self, product: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.iter().filter(move |gene| product.contains(*gene))
    }

    /// True when `labels` spell the required genes forward or exactly reversed.
    ///
    /// A `None` label (window padding) never matches.
    pub fn matches_order(&self, labels: &[Option<&str>]) -> bool {
        if labels.len() != self.genes.len() {
            return false;
        }

        let forward = labels
            .iter()
            .zip(self.genes.iter())
            .all(|(label, gene)| *label == Some(gene.as_str()));

        forward
            || labels
                .iter()
                .zip(self.genes.iter().rev())
                .all(|(label, gene)| *label == Some(gene.as_str()))
    }

    /// "16s-23s", used in record descriptions
    pub fn joined(&self) -> String {
        self.genes.join("-")
    }

    /// "16S-23S", used in output file names
    pub fn file_suffix(&self) -> String {
        self.joined().to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genes(names: &[&str]) -> RequiredGenes {
        RequiredGenes::new(names).unwrap()
    }

    #[test]
    fn test_normalizes_case_and_duplicates() {
        let required = genes(&["16S", "23S", "16s"]);
        assert_eq!(required.as_slice(), &["16s".to_string(), "23s".to_string()]);
        assert_eq!(required.joined(), "16s-23s");
        assert_eq!(required.file_suffix(), "16S-23S");
    }

    #[test]
    fn test_empty_is_rejected() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            RequiredGenes::new(&empty),
            Err(OperonError::InvalidInput(_))
        ));
        assert!(RequiredGenes::new(&[" "]).is_err());
    }

    #[test]
    fn test_matches_forward_and_reverse_order() {
        let required = genes(&["g1", "g2"]);
        assert!(required.matches_order(&[Some("g1"), Some("g2")]));
        assert!(required.matches_order(&[Some("g2"), Some("g1")]));
    }

    #[test]
    fn test_rejects_repeats_padding_and_permutations() {
        let required = genes(&["g1", "g2"]);
        assert!(!required.matches_order(&[Some("g1"), Some("g1")]));
        assert!(!required.matches_order(&[Some("g1"), None]));
        assert!(!required.matches_order(&[Some("g1")]));

        let three = genes(&["a", "b", "c"]);
        assert!(three.matches_order(&[Some("c"), Some("b"), Some("a")]));
        assert!(!three.matches_order(&[Some("b"), Some("a"), Some("c")]));
    }

    #[test]
    fn test_matches_in_product() {
        let required = genes(&["16s", "23s", "5s"]);
        let found: Vec<_> = required.matches_in("16s ribosomal rna").collect();
        assert_eq!(found, vec!["16s"]);

        let none: Vec<_> = required.matches_in("hypothetical protein").collect();
        assert!(none.is_empty());
    }
}
