use super::builder::{format_number, QueryBuilder};
use super::ClauseSource;

/// Bounds on the USD display price.
#[derive(Debug, Clone, Default)]
pub struct PriceFilter {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceFilter {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }
}

impl ClauseSource for PriceFilter {
    fn clause(&self) -> Option<String> {
        let mut qb = QueryBuilder::new();
        if let Some(min) = self.min {
            qb.gte("usd", &format_number(min));
        }
        if let Some(max) = self.max {
            qb.lte("usd", &format_number(max));
        }
        qb.build_non_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_render_independently() {
        assert_eq!(PriceFilter::new(Some(0.5), None).clause().unwrap(), "usd>=0.5");
        assert_eq!(PriceFilter::new(None, Some(10.0)).clause().unwrap(), "usd<=10");
        assert_eq!(
            PriceFilter::new(Some(1.0), Some(2.5)).clause().unwrap(),
            "usd>=1 usd<=2.5"
        );
        assert_eq!(PriceFilter::default().clause(), None);
    }
}
