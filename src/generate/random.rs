use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::VizConfig;
use crate::foundation::error::{VizError, VizResult};
use crate::generate::{Algorithm, GenerateRequest};
use crate::step::model::TraversalOrder;

const VALUE_MAX: i64 = 100;

/// Random input for `algorithm`, reproducible from `seed`.
///
/// Arrays hold values in `1..=100` and never exceed the configured ceiling. Search targets are
/// drawn from the array, and binary search gets a sorted array. Linear structures have no
/// generated input and are rejected.
#[tracing::instrument(skip(config))]
pub fn random_request(
    algorithm: Algorithm,
    config: &VizConfig,
    seed: u64,
) -> VizResult<GenerateRequest> {
    let max = config.settings(algorithm).max_input;
    let mut rng = StdRng::seed_from_u64(seed);

    let req = match algorithm {
        Algorithm::LinearSearch => {
            let array = random_array(&mut rng, 15.min(max));
            let target = pick(&mut rng, &array);
            GenerateRequest::LinearSearch { array, target }
        }
        Algorithm::BinarySearch => {
            let mut array = random_array(&mut rng, 15.min(max));
            array.sort_unstable();
            let target = pick(&mut rng, &array);
            GenerateRequest::BinarySearch { array, target }
        }
        Algorithm::BubbleSort => GenerateRequest::BubbleSort {
            array: random_array(&mut rng, 10.min(max)),
        },
        Algorithm::SelectionSort => GenerateRequest::SelectionSort {
            array: random_array(&mut rng, 10.min(max)),
        },
        Algorithm::InsertionSort => GenerateRequest::InsertionSort {
            array: random_array(&mut rng, 10.min(max)),
        },
        Algorithm::HeapSort => GenerateRequest::HeapSort {
            array: random_array(&mut rng, 10.min(max)),
        },
        Algorithm::MergeSort => GenerateRequest::MergeSort {
            array: random_array(&mut rng, 12.min(max)),
        },
        Algorithm::QuickSort => GenerateRequest::QuickSort {
            array: random_array(&mut rng, 12.min(max)),
        },
        Algorithm::Factorial => GenerateRequest::Factorial {
            n: random_n(&mut rng, 1, 10, max),
        },
        Algorithm::Fibonacci => GenerateRequest::Fibonacci {
            n: random_n(&mut rng, 2, 8, max),
        },
        Algorithm::TowerOfHanoi => GenerateRequest::TowerOfHanoi {
            disks: random_n(&mut rng, 1, u32::MAX, max),
        },
        Algorithm::TreeTraversal => {
            const ORDERS: [TraversalOrder; 4] = [
                TraversalOrder::InOrder,
                TraversalOrder::PreOrder,
                TraversalOrder::PostOrder,
                TraversalOrder::LevelOrder,
            ];
            GenerateRequest::TreeTraversal {
                order: ORDERS[rng.random_range(0..ORDERS.len())],
                tree: None,
            }
        }
        Algorithm::Stack | Algorithm::Queue | Algorithm::LinkedList => {
            return Err(VizError::invalid_input(format!(
                "'{algorithm}' has no random input; apply operations instead"
            )));
        }
    };
    Ok(req)
}

fn random_array(rng: &mut StdRng, len: usize) -> Vec<i64> {
    (0..len).map(|_| rng.random_range(1..=VALUE_MAX)).collect()
}

fn pick(rng: &mut StdRng, values: &[i64]) -> i64 {
    if values.is_empty() {
        return rng.random_range(1..=VALUE_MAX);
    }
    values[rng.random_range(0..values.len())]
}

/// Uniform in `lo..=hi`, with `hi` capped by the configured ceiling.
fn random_n(rng: &mut StdRng, lo: u32, hi: u32, max: usize) -> u32 {
    let hi = hi.min(u32::try_from(max).unwrap_or(u32::MAX));
    let lo = lo.min(hi);
    rng.random_range(lo..=hi)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/random.rs"]
mod tests;
