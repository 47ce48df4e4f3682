use crate::OperationCost;

/// A value paired with the cost of producing it.
#[must_use]
#[derive(Debug, Eq, PartialEq)]
pub struct CostContext<T> {
    /// Result of the operation.
    pub value: T,
    /// What producing it cost.
    pub cost: OperationCost,
}

impl<T> CostContext<T> {
    /// Returns the value, folding its cost into `acc_cost`.
    pub fn unwrap_add_cost(self, acc_cost: &mut OperationCost) -> T {
        *acc_cost += self.cost;
        self.value
    }

    /// Returns the value and discards the cost.
    pub fn unwrap(self) -> T {
        self.value
    }

    /// Transforms the value; the cost is carried over unchanged.
    pub fn map<B>(self, f: impl FnOnce(T) -> B) -> CostContext<B> {
        let CostContext { value, cost } = self;
        CostContext {
            value: f(value),
            cost,
        }
    }
}

/// A fallible operation together with its cost. The cost is reported on both
/// the success and the failure path.
pub type CostResult<T, E> = CostContext<Result<T, E>>;

/// Attaches a cost to any value.
pub trait CostsExt: Sized {
    /// Pairs the value with `cost`.
    fn wrap_with_cost(self, cost: OperationCost) -> CostContext<Self> {
        CostContext { value: self, cost }
    }
}

impl<T> CostsExt for T {}

/// `?` for code accumulating costs in `$cost`: the cost of the `CostResult`
/// expression is added to `$cost`, then an `Err` returns early wrapped with
/// the total.
#[macro_export]
macro_rules! cost_return_on_error {
    ( &mut $cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result = { $($body)+ }.unwrap_add_cost(&mut $cost);
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}

/// `?` for a plain `Result` inside code accumulating costs: an `Err` returns
/// early wrapped with `$cost` as accumulated so far.
#[macro_export]
macro_rules! cost_return_on_error_no_add {
    ( &$cost:ident, $($body:tt)+ ) => {
        {
            use $crate::CostsExt;
            let result = { $($body)+ };
            match result {
                Ok(x) => x,
                Err(e) => return Err(e).wrap_with_cost($cost),
            }
        }
    };
}
