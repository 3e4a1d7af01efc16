fn main() {
    basic::term::main()
}
