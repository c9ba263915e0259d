//! Defines the handler symbol by hand with a body that returns.
//!
//! `bind_handler!` rejects such a handler at compile time; writing the
//! symbol directly gets past that, and the dispatch guard must still stop
//! the process before the failed check's caller continues.

use contract_checks::ContractViolation;

#[no_mangle]
fn __contract_checks_violated(_violation: &ContractViolation<'_>) {}

fn main() {
    tracing_subscriber::fmt::init();

    println!("expect {}:{}", file!(), line!() + 1);
    contract_checks::precondition!(false, "ignored by the handler");
    println!("continued");
}
