use crate::error;
use crate::lang::ast::VarName;
use crate::lang::{Error, Number};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

type Result<T> = std::result::Result<T, Error>;

/// Array cells available until a DIM says otherwise.
pub const DEFAULT_ARRAY_SIZE: usize = 1024;

/// The 26 variable bindings, all present and zero until written.
#[derive(Debug, Clone)]
pub struct Vars {
    values: [Number; 26],
}

impl Default for Vars {
    fn default() -> Vars {
        Vars { values: [0; 26] }
    }
}

impl Vars {
    pub fn fetch(&self, name: VarName) -> Number {
        self.values[name.index()]
    }

    pub fn store(&mut self, name: VarName, value: Number) {
        self.values[name.index()] = value;
    }

    pub fn clear(&mut self) {
        self.values = [0; 26];
    }

    pub fn entries(&self) -> impl Iterator<Item = (VarName, Number)> + '_ {
        self.values.iter().enumerate().map(|(i, &value)| {
            let name = VarName::new(b'A' + i as u8).unwrap();
            (name, value)
        })
    }
}

/// The `@(i)` array.
///
/// Every subscript is folded into `[0, len)` by true modulo before
/// use, so any integer addresses some cell as long as the array is
/// non-empty.
#[derive(Debug, Clone)]
pub struct Array {
    cells: Vec<Number>,
}

impl Default for Array {
    fn default() -> Array {
        Array {
            cells: vec![0; DEFAULT_ARRAY_SIZE],
        }
    }
}

impl Array {
    /// Back to the default size, zero-filled.
    pub fn reset(&mut self) {
        self.cells = vec![0; DEFAULT_ARRAY_SIZE];
    }

    /// Reallocate, zero-filled, discarding prior contents.
    pub fn dim(&mut self, size: Number) -> Result<()> {
        if size < 0 {
            return Err(error!(IllegalFunctionCall; "NEGATIVE ARRAY SIZE"));
        }
        self.cells = vec![0; size as usize];
        Ok(())
    }

    fn offset(&self, index: Number) -> Result<usize> {
        if self.cells.is_empty() {
            return Err(error!(SubscriptOutOfRange));
        }
        Ok(index.rem_euclid(self.cells.len() as Number) as usize)
    }

    pub fn get(&self, index: Number) -> Result<Number> {
        Ok(self.cells[self.offset(index)?])
    }

    pub fn set(&mut self, index: Number, value: Number) -> Result<()> {
        let offset = self.offset(index)?;
        self.cells[offset] = value;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (usize, Number)> + '_ {
        self.cells.iter().copied().enumerate()
    }
}

/// Everything expression evaluation reads or writes: the variable
/// bindings, the array, and the random number generator.
#[derive(Debug)]
pub struct Env {
    pub vars: Vars,
    pub array: Array,
    rng: StdRng,
}

impl Default for Env {
    fn default() -> Env {
        Env {
            vars: Vars::default(),
            array: Array::default(),
            rng: StdRng::from_entropy(),
        }
    }
}

impl Env {
    /// Zero the variables and the array and reseed the generator.
    pub fn reset(&mut self) {
        self.vars.clear();
        self.array.reset();
        self.rng = StdRng::from_entropy();
    }

    /// Uniform value in `[0, bound)`.
    pub fn rnd(&mut self, bound: Number) -> Result<Number> {
        if bound <= 0 {
            return Err(error!(IllegalFunctionCall; "RND NEEDS A POSITIVE BOUND"));
        }
        Ok(self.rng.gen_range(0..bound))
    }
}
