//! Host functions installed into every interpreter's global scope.

use std::rc::Rc;

use chrono::Utc;
use log::debug;

use crate::environment::Environment;
use crate::value::{NativeFunction, Value};

/// Every native the interpreter ships with.
pub const NATIVES: &[NativeFunction] = &[NativeFunction {
    name: "clock",
    arity: 0,
    func: clock,
}];

/// Milliseconds since the Unix epoch, as a number.
fn clock(_args: &[Value]) -> Result<Value, String> {
    let millis: i64 = Utc::now().timestamp_millis();

    debug!("Native function 'clock' returned: {}", millis);

    Ok(Value::Number(millis as f64))
}

/// Define each entry of [`NATIVES`] in `globals`.
pub fn install(globals: &mut Environment) {
    for native in NATIVES {
        debug!("Defining native function '{}'", native.name);

        globals.define(
            native.name,
            Value::NativeFunction(Rc::new(NativeFunction {
                name: native.name,
                arity: native.arity,
                func: native.func,
            })),
        );
    }
}
