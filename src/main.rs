fn main() {
    altair::term::main()
}
