// push one formatted line onto a String
macro_rules! cpf {
    ($content:expr, $($arg:tt)*) => {
        $content.push_str(&format!("{}\n", format!($($arg)*)));
    }
}
