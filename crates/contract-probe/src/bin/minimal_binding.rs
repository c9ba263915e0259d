//! Fails a safety precondition under the stock silent-abort handler.

contract_checks::bind_minimal_handler!();

fn main() {
    tracing_subscriber::fmt::init();

    contract_checks::safety_precondition!(false, "#~#");
    println!("returned");
}
