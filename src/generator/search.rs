use std::time::Instant;

use rand::Rng;

use crate::expression::{Number, Operator, Token};
use crate::generator::config::GenerationParams;
use crate::generator::constants::SMALL_NUMBER_LIMIT;
use crate::puzzle::Puzzle;

/// The attempt ran past its deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AttemptTimeout;

type Phase = Result<bool, AttemptTimeout>;

/// Depth-first search state for a single generation attempt.
///
/// `numbers`, `vals` and `expression` move in lock-step: every choice
/// pushes onto them and every backtrack pops the same entries, so `vals`
/// always equals what evaluating `expression` would leave on the stack.
pub(crate) struct SearchState<'a, R: Rng> {
    rng: &'a mut R,
    params: GenerationParams,
    size: usize,
    deadline: Instant,
    numbers: Vec<Number>,
    vals: Vec<Number>,
    expression: Vec<Token>,
}

impl<'a, R: Rng> SearchState<'a, R> {
    pub(crate) fn new(
        rng: &'a mut R,
        params: GenerationParams,
        size: usize,
        deadline: Instant,
    ) -> Self {
        Self {
            rng,
            params,
            size,
            deadline,
            numbers: Vec::with_capacity(size),
            vals: Vec::with_capacity(size),
            expression: Vec::with_capacity(2 * size),
        }
    }

    /// Run the search to completion, timeout, or exhaustion.
    pub(crate) fn run(mut self) -> Result<Option<Puzzle>, AttemptTimeout> {
        if self.choose_number()? {
            Ok(self.into_puzzle())
        } else {
            Ok(None)
        }
    }

    fn into_puzzle(self) -> Option<Puzzle> {
        let target = *self.vals.first()?;
        Some(Puzzle {
            target,
            numbers: self.numbers,
            expression: self.expression,
        })
    }

    fn check_deadline(&self) -> Result<(), AttemptTimeout> {
        if Instant::now() > self.deadline {
            Err(AttemptTimeout)
        } else {
            Ok(())
        }
    }

    fn finished(&self) -> bool {
        self.numbers.len() == self.size
            && matches!(self.vals.as_slice(), [value] if (1..=self.params.max_target).contains(value))
    }

    /// Small numbers are favoured: always when `max_number` is small, and
    /// half of the time otherwise.
    fn sample_number(&mut self) -> Number {
        let max_number = self.params.max_number;
        if max_number <= SMALL_NUMBER_LIMIT || self.rng.gen_bool(0.5) {
            self.rng.gen_range(1..=max_number.min(SMALL_NUMBER_LIMIT))
        } else {
            self.rng.gen_range(SMALL_NUMBER_LIMIT + 1..=max_number)
        }
    }

    fn push_number(&mut self, number: Number) {
        self.numbers.push(number);
        self.vals.push(number);
        self.expression.push(Token::Number(number));
    }

    fn pop_number(&mut self) {
        self.numbers.pop();
        self.vals.pop();
        self.expression.pop();
    }

    /// Place another number, then try to combine it or place yet another.
    ///
    /// Keeps drawing fresh numbers until one leads to a finished puzzle;
    /// only the deadline ends a level that never succeeds.
    fn choose_number(&mut self) -> Phase {
        self.check_deadline()?;

        while self.numbers.len() < self.size {
            let number = self.sample_number();
            self.push_number(number);

            if self.finished() || self.choose_operator()? || self.choose_number()? {
                return Ok(true);
            }

            self.pop_number();
        }

        Ok(false)
    }

    /// Combine the top two values with each legal operator in turn.
    ///
    /// On failure `vals` ends as `[.., lhs, rhs]` again, which is exactly
    /// what the enclosing number choice expects to pop.
    fn choose_operator(&mut self) -> Phase {
        self.check_deadline()?;

        if self.vals.len() < 2 {
            return Ok(false);
        }
        let (Some(rhs), Some(lhs)) = (self.vals.pop(), self.vals.pop()) else {
            return Ok(false);
        };

        for op in Operator::ALL {
            let Some(value) = op.apply_exact(lhs, rhs) else {
                continue;
            };

            self.vals.push(value);
            self.expression.push(Token::Operator(op));

            if self.finished() || self.choose_operator()? || self.choose_number()? {
                return Ok(true);
            }

            self.expression.pop();
            self.vals.pop();
        }

        self.vals.push(lhs);
        self.vals.push(rhs);
        Ok(false)
    }
}

#[cfg(test)]
mod tests_inner_search {
    use std::time::{Duration, Instant};

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::{AttemptTimeout, SearchState};
    use crate::expression::{Operator, Token};
    use crate::generator::config::GenerationParams;

    fn far_deadline() -> Instant {
        Instant::now() + Duration::from_secs(60)
    }

    #[test]
    fn test_failed_operator_choice_restores_both_operands() {
        let mut rng = StdRng::seed_from_u64(0);
        let params = GenerationParams::new(2, 2, 10, 1);
        let mut state = SearchState::new(&mut rng, params, 2, far_deadline());
        state.push_number(7);
        state.push_number(3);

        assert_eq!(state.choose_operator(), Ok(false));
        assert_eq!(state.vals, vec![7, 3]);
        assert_eq!(state.numbers, vec![7, 3]);
        assert_eq!(state.expression, vec![Token::Number(7), Token::Number(3)]);
    }

    #[test]
    fn test_operator_choice_stops_on_first_finishing_operator() {
        let mut rng = StdRng::seed_from_u64(0);
        let params = GenerationParams::new(2, 2, 10, 4);
        let mut state = SearchState::new(&mut rng, params, 2, far_deadline());
        state.push_number(7);
        state.push_number(3);

        assert_eq!(state.choose_operator(), Ok(true));
        assert_eq!(state.vals, vec![4]);
        assert_eq!(
            state.expression,
            vec![
                Token::Number(7),
                Token::Number(3),
                Token::Operator(Operator::Sub)
            ]
        );
    }

    #[test]
    fn test_operator_choice_needs_two_values() {
        let mut rng = StdRng::seed_from_u64(0);
        let params = GenerationParams::new(2, 2, 10, 100);
        let mut state = SearchState::new(&mut rng, params, 2, far_deadline());
        state.push_number(5);

        assert_eq!(state.choose_operator(), Ok(false));
        assert_eq!(state.vals, vec![5]);
    }

    #[test]
    fn test_expired_deadline_aborts() {
        let mut rng = StdRng::seed_from_u64(0);
        let params = GenerationParams::new(3, 3, 10, 100);
        let deadline = Instant::now() - Duration::from_millis(1);
        let state = SearchState::new(&mut rng, params, 3, deadline);

        assert!(matches!(state.run(), Err(AttemptTimeout)));
    }

    #[test]
    fn test_sampled_numbers_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        let params = GenerationParams::new(1, 1, 7, 100);
        let mut state = SearchState::new(&mut rng, params, 1, far_deadline());
        for _ in 0..1000 {
            assert!((1..=7).contains(&state.sample_number()));
        }
    }
}
