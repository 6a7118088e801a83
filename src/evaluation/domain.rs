//! Evaluation primitives for the hold-out partition.

use std::fmt;

/// Binary confusion counts; "positive" is the fraudulent class.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_negative: usize,
    pub false_positive: usize,
    pub false_negative: usize,
    pub true_positive: usize,
}

impl ConfusionMatrix {
    pub fn record(&mut self, actual: u8, predicted: u8) {
        match (actual, predicted) {
            (0, 0) => self.true_negative += 1,
            (0, _) => self.false_positive += 1,
            (_, 0) => self.false_negative += 1,
            _ => self.true_positive += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.true_negative + self.false_positive + self.false_negative + self.true_positive
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_negative + self.true_positive, self.total())
    }

    /// Of everything flagged fraudulent, how much actually was.
    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    /// Of all actual fraud, how much was flagged.
    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Summary of a hold-out evaluation pass.
#[derive(Clone, Debug)]
pub struct EvalReport {
    pub confusion: ConfusionMatrix,
}

impl fmt::Display for EvalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "accuracy {:.3}, precision {:.3}, recall {:.3} over {} hold-out rows",
            self.confusion.accuracy(),
            self.confusion.precision(),
            self.confusion.recall(),
            self.confusion.total()
        )
    }
}
