fn main() {
    if let Err(err) = rseq::run(std::env::args().skip(1).peekable()) {
        err.termination()
    }
}
