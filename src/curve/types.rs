//----------------------------------------
// curve mod types
//----------------------------------------
use serde::{Deserialize, Serialize};

use crate::curve::error::CurveError;
use crate::error::CtsurvErr;

/// Step-function survival curve.
///
/// `time` is non-negative and strictly increasing, except that time 0 may
/// appear twice at the start (the (0, 1) anchor, then the drop from events
/// at time 0).
/// `probability` is aligned with `time`; both have at least one entry. Risk-set counts, when present, are aligned with
/// `time` and are what variance calculations (RMST, Greenwood bands) need.
/// Curves are immutable once built; transforms return new curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurveRecord", into = "CurveRecord")]
pub struct KaplanMeierCurve {
    time: Vec<f64>,
    probability: Vec<f64>,
    events_at_time: Option<Vec<usize>>,
    at_risk_at_time: Option<Vec<usize>>,
    interval: Option<Vec<(f64, f64)>>,
}

/// Wire shape of a curve; goes through validation on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CurveRecord {
    time: Vec<f64>,
    probability: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    events_at_time: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    at_risk_at_time: Option<Vec<usize>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    interval: Option<Vec<(f64, f64)>>,
}

impl TryFrom<CurveRecord> for KaplanMeierCurve {
    type Error = CtsurvErr;

    fn try_from(record: CurveRecord) -> Result<Self, Self::Error> {
        let curve = match (record.events_at_time, record.at_risk_at_time) {
            (Some(events), Some(at_risk)) => {
                KaplanMeierCurve::with_counts(record.time, record.probability, events, at_risk)?
            }
            _ => KaplanMeierCurve::new(record.time, record.probability)?,
        };
        match record.interval {
            Some(interval) => curve.with_interval(interval),
            None => Ok(curve),
        }
    }
}

impl From<KaplanMeierCurve> for CurveRecord {
    fn from(curve: KaplanMeierCurve) -> Self {
        CurveRecord {
            time: curve.time,
            probability: curve.probability,
            events_at_time: curve.events_at_time,
            at_risk_at_time: curve.at_risk_at_time,
            interval: curve.interval,
        }
    }
}

impl KaplanMeierCurve {
    pub fn new(time: Vec<f64>, probability: Vec<f64>) -> Result<Self, CtsurvErr> {
        if time.len() != probability.len() {
            return Err(CurveError::ProbabilityLengths {
                times: time.len(),
                probabilities: probability.len(),
            }
            .into());
        }
        if time.is_empty() {
            return Err(CurveError::Empty.into());
        }
        if let Some(index) = time.iter().position(|t| !(*t >= 0.0)) {
            return Err(CurveError::NegativeTime {
                index,
                value: time[index],
            }
            .into());
        }
        // Time 0 may appear twice at the start: the anchor, then the drop from
        // events at time 0
        let anchor_repeat = |i: usize| i == 0 && time[0] == 0.0 && time[1] == 0.0;
        if let Some(i) = time
            .windows(2)
            .enumerate()
            .position(|(i, w)| !(w[1] > w[0] || anchor_repeat(i)))
        {
            return Err(CurveError::TimesNotIncreasing(i + 1).into());
        }
        if let Some(index) = probability.iter().position(|p| !(0.0..=1.0).contains(p)) {
            return Err(CurveError::ProbabilityOutOfBounds {
                index,
                value: probability[index],
            }
            .into());
        }

        Ok(KaplanMeierCurve {
            time,
            probability,
            events_at_time: None,
            at_risk_at_time: None,
            interval: None,
        })
    }

    pub fn with_counts(
        time: Vec<f64>,
        probability: Vec<f64>,
        events_at_time: Vec<usize>,
        at_risk_at_time: Vec<usize>,
    ) -> Result<Self, CtsurvErr> {
        if events_at_time.len() != time.len() || at_risk_at_time.len() != time.len() {
            return Err(CurveError::CountLengths {
                times: time.len(),
                events: events_at_time.len(),
                at_risk: at_risk_at_time.len(),
            }
            .into());
        }
        let mut curve = KaplanMeierCurve::new(time, probability)?;
        curve.events_at_time = Some(events_at_time);
        curve.at_risk_at_time = Some(at_risk_at_time);
        Ok(curve)
    }

    /// Attaches a per-point confidence band (display only)
    pub fn with_interval(mut self, interval: Vec<(f64, f64)>) -> Result<Self, CtsurvErr> {
        if interval.len() != self.time.len() {
            return Err(CurveError::IntervalLength {
                times: self.time.len(),
                intervals: interval.len(),
            }
            .into());
        }
        self.interval = Some(interval);
        Ok(self)
    }

    /// New curve on the same time grid; risk-set data is not carried over
    pub(crate) fn with_probability(&self, probability: Vec<f64>) -> Result<Self, CtsurvErr> {
        KaplanMeierCurve::new(self.time.clone(), probability)
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn probability(&self) -> &[f64] {
        &self.probability
    }

    pub fn events_at_time(&self) -> Option<&[usize]> {
        self.events_at_time.as_deref()
    }

    pub fn at_risk_at_time(&self) -> Option<&[usize]> {
        self.at_risk_at_time.as_deref()
    }

    pub fn interval(&self) -> Option<&[(f64, f64)]> {
        self.interval.as_deref()
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn last_time(&self) -> f64 {
        self.time[self.time.len() - 1]
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.probability.iter().copied())
    }

    /// Step-function value at `t`; 1 before the first time point
    pub fn survival_at(&self, t: f64) -> f64 {
        match self.time.iter().rposition(|&s| s <= t) {
            Some(i) => self.probability[i],
            None => 1.0,
        }
    }

    /// First time at which survival drops to 0.5 or below
    pub fn median(&self) -> Option<f64> {
        self.points().find(|&(_, s)| s <= 0.5).map(|(t, _)| t)
    }
}

/// Precomputed curves for a trial, one per arm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KaplanMeierPayload {
    pub arm_names: Vec<String>,
    pub curves: Vec<KaplanMeierCurve>,
    pub time_scale: String,
}

impl KaplanMeierPayload {
    pub fn curve_for(&self, arm_name: &str) -> Option<&KaplanMeierCurve> {
        self.arm_names
            .iter()
            .position(|name| name == arm_name)
            .and_then(|i| self.curves.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_lengths_error() {
        if let Err(e) = KaplanMeierCurve::new(vec![0.0, 1.0], vec![1.0]) {
            assert_eq!(
                String::from(
                    "while building survival curve: lengths of curve times and \
                    probabilities don't match (times length 2, probabilities length 1)"
                ),
                format!("{}", e)
            );
        } else {
            panic!()
        }
    }

    #[test]
    fn rejects_bad_curves() {
        assert!(KaplanMeierCurve::new(vec![], vec![]).is_err());
        assert!(KaplanMeierCurve::new(vec![0.0, 2.0, 2.0], vec![1.0, 0.5, 0.4]).is_err());
        assert!(KaplanMeierCurve::new(vec![0.0, 0.0, 0.0], vec![1.0, 0.5, 0.4]).is_err());
        assert!(KaplanMeierCurve::new(vec![1.0, 1.0], vec![0.5, 0.4]).is_err());
        assert!(KaplanMeierCurve::new(vec![0.0, 1.0], vec![1.0, 1.2]).is_err());
        assert!(KaplanMeierCurve::new(vec![0.0, 1.0], vec![1.0, f64::NAN]).is_err());
        assert!(
            KaplanMeierCurve::with_counts(vec![0.0, 1.0], vec![1.0, 0.5], vec![0], vec![0, 2])
                .is_err()
        );
    }

    #[test]
    fn anchor_may_repeat_time_zero() {
        let curve = KaplanMeierCurve::new(vec![0.0, 0.0, 1.0], vec![1.0, 0.5, 0.0]).unwrap();
        assert_eq!(curve.probability()[0], 1.0);
        assert_eq!(curve.survival_at(0.0), 0.5);
    }

    #[test]
    fn negative_time_error() {
        if let Err(e) = KaplanMeierCurve::new(vec![-1.0, 2.0], vec![1.0, 0.5]) {
            assert_eq!(
                String::from(
                    "while building survival curve: times must be non-negative; got -1 at index 0"
                ),
                format!("{}", e)
            );
        } else {
            panic!()
        }
    }

    #[test]
    fn step_lookup_and_median() {
        let curve = KaplanMeierCurve::new(vec![0.0, 2.0, 5.0, 9.0], vec![1.0, 0.8, 0.5, 0.2])
            .expect("failed to construct curve");
        assert_eq!(curve.survival_at(-1.0), 1.0);
        assert_eq!(curve.survival_at(1.9), 1.0);
        assert_eq!(curve.survival_at(2.0), 0.8);
        assert_eq!(curve.survival_at(100.0), 0.2);
        assert_eq!(curve.median(), Some(5.0));

        let flat = KaplanMeierCurve::new(vec![0.0, 3.0], vec![1.0, 0.9]).unwrap();
        assert_eq!(flat.median(), None);
    }

    #[test]
    fn payload_lookup() {
        let payload = KaplanMeierPayload {
            arm_names: vec!["control".to_string(), "treatment".to_string()],
            curves: vec![
                KaplanMeierCurve::new(vec![0.0, 1.0], vec![1.0, 0.5]).unwrap(),
                KaplanMeierCurve::new(vec![0.0, 1.0], vec![1.0, 0.7]).unwrap(),
            ],
            time_scale: "months".to_string(),
        };
        assert_eq!(payload.curve_for("treatment").unwrap().probability()[1], 0.7);
        assert!(payload.curve_for("placebo").is_none());
    }

    #[test]
    fn deserialization_validates() {
        let good: KaplanMeierCurve =
            toml::from_str("time = [0.0, 1.0]\nprobability = [1.0, 0.4]\n").unwrap();
        assert_eq!(good.len(), 2);
        assert!(good.events_at_time().is_none());

        let bad: Result<KaplanMeierCurve, _> =
            toml::from_str("time = [0.0, 1.0]\nprobability = [1.0]\n");
        assert!(bad.is_err());
    }
}
