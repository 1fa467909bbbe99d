//! Prime supply for the notation codecs.
//!
//! Pure functions, no caching: the codecs only ever need primes up to the
//! largest factor of the value being encoded, or as many primes as a
//! notation has exponent slots.

use num_integer::Integer;

/// Ordering of a returned prime list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Ascending,
    Descending,
}

/// Returns every prime `<= n` in ascending order.
///
/// `n < 2` yields an empty list.
pub fn primes_upto(n: u64) -> Vec<u64> {
    if n < 2 {
        return Vec::new();
    }

    let limit = n as usize;
    let mut composite = vec![false; limit + 1];
    let mut primes = Vec::new();

    for i in 2..=limit {
        if composite[i] {
            continue;
        }
        primes.push(i as u64);
        let mut multiple = match i.checked_mul(i) {
            Some(square) => square,
            None => continue,
        };
        while multiple <= limit {
            composite[multiple] = true;
            multiple += i;
        }
    }

    primes
}

/// Upper bound on the `k`-th prime, counting from 1.
///
/// Rosser's bound `p_k < k (ln k + ln ln k)` holds for `k >= 6`; below that
/// 13 covers every case.
pub fn nth_prime_bound(k: usize) -> u64 {
    if k < 6 {
        return 13;
    }
    let k = k as f64;
    (k * (k.ln() + k.ln().ln())).ceil() as u64
}

/// Returns the first `k` primes in the requested order.
pub fn first_primes(k: usize, order: Order) -> Vec<u64> {
    if k == 0 {
        return Vec::new();
    }

    let mut bound = nth_prime_bound(k);
    let mut primes = primes_upto(bound);
    while primes.len() < k {
        bound *= 2;
        primes = primes_upto(bound);
    }
    primes.truncate(k);

    if order == Order::Descending {
        primes.reverse();
    }
    primes
}

/// Returns the prime factors of `n` with multiplicity, ascending.
///
/// `n < 2` yields an empty list.
pub fn factorize(n: u64) -> Vec<u64> {
    factorize_upto(n, u64::MAX).unwrap_or_default()
}

/// Like [`factorize`], but gives up with `None` once `n` is known to have a
/// prime factor above `ceiling`. Trial division never passes `ceiling`.
pub fn factorize_upto(n: u64, ceiling: u64) -> Option<Vec<u64>> {
    let mut factors = Vec::new();
    let mut rest = n;
    let mut divisor = 2u64;

    while rest >= 2 && divisor <= rest / divisor {
        if divisor > ceiling {
            // Every factor of `rest` is at least `divisor`
            return None;
        }
        let (quotient, remainder) = rest.div_rem(&divisor);
        if remainder == 0 {
            factors.push(divisor);
            rest = quotient;
        } else {
            divisor += if divisor == 2 { 1 } else { 2 };
        }
    }
    if rest >= 2 {
        if rest > ceiling {
            return None;
        }
        factors.push(rest);
    }

    Some(factors)
}
