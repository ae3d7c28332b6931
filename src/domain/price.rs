use serde::Deserialize;

/// Daily price history as served by `GET /api/prices`: two parallel arrays,
/// dates ascending.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawPriceSeries")]
pub struct PriceSeries {
    dates: Vec<String>,
    prices: Vec<f64>,
}

#[derive(Deserialize)]
struct RawPriceSeries {
    dates: Vec<String>,
    prices: Vec<f64>,
}

impl TryFrom<RawPriceSeries> for PriceSeries {
    type Error = String;

    fn try_from(raw: RawPriceSeries) -> Result<Self, Self::Error> {
        Self::new(raw.dates, raw.prices)
    }
}

impl PriceSeries {
    pub fn new(dates: Vec<String>, prices: Vec<f64>) -> Result<Self, String> {
        if dates.len() != prices.len() {
            return Err(format!(
                "{} dates but {} prices",
                dates.len(),
                prices.len()
            ));
        }
        if let Some(i) = prices.iter().position(|p| !p.is_finite()) {
            return Err(format!("price for {} is not a finite number", dates[i]));
        }
        Ok(Self { dates, prices })
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn first_date(&self) -> Option<&str> {
        self.dates.first().map(String::as_str)
    }

    pub fn last_date(&self) -> Option<&str> {
        self.dates.last().map(String::as_str)
    }

    /// Chart points, x being the trading-day index.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.prices
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, *p))
            .collect()
    }

    /// Lowest and highest price, `None` for an empty series.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        let first = *self.prices.first()?;
        Some(
            self.prices
                .iter()
                .fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))),
        )
    }

    /// x position of a `YYYY-MM-DD` date: the first trading day on or after
    /// it. Dates outside the series have no position.
    pub fn position_of(&self, date: &str) -> Option<f64> {
        let date = date.get(..10).unwrap_or(date);
        if date < self.first_date()? || date > self.last_date()? {
            return None;
        }
        Some(self.dates.partition_point(|d| d.as_str() < date) as f64)
    }
}
