fn main() {
    completion_md::cli::main();
}
