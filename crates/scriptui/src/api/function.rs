//! Callback program operations

use super::Api;
use crate::resource::{Handle, ResourceError};
use crate::ui::{Function, ProgramRuntime};

impl Api {
    /// Wrap program source in a function resource
    pub fn create_function(&mut self, code: &str) -> Result<Handle, ResourceError> {
        let memory = self.resources.config().function_memory;
        self.resources.insert(Function::new(code, memory))
    }

    /// Run the program once through the host's runtime
    pub fn function_execute(&mut self, func: Handle, runtime: &mut dyn ProgramRuntime) -> Result<(), ResourceError> {
        self.resources.get_mut::<Function>(func)?.execute(runtime)
    }

    /// Read a named number
    pub fn function_get_value(&mut self, func: Handle, name: &str) -> Result<f64, ResourceError> {
        self.resources.get::<Function>(func)?.get_value(name)
    }

    /// Write a named number
    pub fn function_set_value(&mut self, func: Handle, name: &str, value: f64) -> Result<(), ResourceError> {
        self.resources.get_mut::<Function>(func)?.set_value(name, value)
    }

    /// Read a named string
    pub fn function_get_string(&mut self, func: Handle, name: &str) -> Result<String, ResourceError> {
        self.resources
            .get::<Function>(func)?
            .get_string(name)
            .map(str::to_owned)
    }

    /// Write a named string
    pub fn function_set_string(&mut self, func: Handle, name: &str, value: &str) -> Result<(), ResourceError> {
        self.resources.get_mut::<Function>(func)?.set_string(name, value)
    }

    /// Copy program memory at the address stored in `name` into `values`
    pub fn function_get_array(&mut self, func: Handle, name: &str, values: &mut [f64]) -> Result<(), ResourceError> {
        self.resources.get::<Function>(func)?.get_array(name, values)
    }

    /// Copy `values` into program memory at the address stored in `name`
    pub fn function_set_array(&mut self, func: Handle, name: &str, values: &[f64]) -> Result<(), ResourceError> {
        self.resources.get_mut::<Function>(func)?.set_array(name, values)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::Api;
    use crate::core::config::ResourceConfig;
    use crate::resource::{Handle, ResourceError};
    use crate::ui::{ProgramRuntime, ProgramState};

    /// Sums `count` cells starting at the address in `buf` into `sum`
    struct Summer {
        runs: u32,
    }

    impl ProgramRuntime for Summer {
        fn execute(&mut self, _code: &str, state: &mut ProgramState) -> Result<(), String> {
            self.runs += 1;
            let start = state.number("buf").ok_or("buf is undefined")? as usize;
            let count = state.number("count").unwrap_or(0.0) as usize;
            let sum: f64 = state.memory().iter().skip(start).take(count).sum();
            state.set_number("sum", sum);
            Ok(())
        }
    }

    #[test]
    fn test_execute_with_memory() {
        let mut api = Api::new(ResourceConfig::default().with_function_memory(32));
        let func = api.create_function("sum = 0; loop(count, sum += buf[i]);").unwrap();
        api.function_set_value(func, "buf", 8.0).unwrap();
        api.function_set_value(func, "count", 3.0).unwrap();
        api.function_set_array(func, "buf", &[1.0, 2.0, 4.0]).unwrap();

        let mut runtime = Summer { runs: 0 };
        api.function_execute(func, &mut runtime).unwrap();
        assert_eq!(runtime.runs, 1);
        assert_eq!(api.function_get_value(func, "sum").unwrap(), 7.0);

        let mut out = [0.0; 3];
        api.function_get_array(func, "buf", &mut out).unwrap();
        assert_eq!(out, [1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_value_errors() {
        let mut api = Api::default();
        let func = api.create_function("").unwrap();
        assert_eq!(
            api.function_get_value(func, "missing"),
            Err(ResourceError::Value("could not read number value".to_string()))
        );
        assert_eq!(
            api.function_set_string(func, "", "x").unwrap_err().to_string(),
            "could not write string value"
        );
        api.function_set_string(func, "name", "value").unwrap();
        assert_eq!(api.function_get_string(func, "name").unwrap(), "value");
    }

    #[test]
    fn test_invalid_function_runs_nothing() {
        let mut api = Api::default();
        let mut runtime = Summer { runs: 0 };
        assert_eq!(
            api.function_execute(Handle::NULL, &mut runtime),
            Err(ResourceError::invalid("UI_Function", Handle::NULL))
        );
        assert_eq!(runtime.runs, 0);
    }
}
