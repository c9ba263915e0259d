//! Fails a precondition under the stock report-and-abort handler.
//!
//! Prints `expect <file>:<line>` for the failing check first.

contract_checks::bind_default_handler!();

fn main() {
    tracing_subscriber::fmt::init();

    let queued = 0usize;
    println!("expect {}:{}", file!(), line!() + 1);
    contract_checks::precondition!(queued > 0, "queue empty ({queued} items)");
    println!("returned");
}
