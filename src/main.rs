use plantain_mf::{Args, MessageCatalog, MessageFormatter, Value};

fn main() {
    let formatter = MessageFormatter::new("en");

    let mut args = Args::new();
    args.set("count", 1);
    println!(
        "{}",
        formatter
            .format("You have {count, plural, one{# item} other{# items}}", &args)
            .unwrap()
    );
    args.set("count", 5);
    println!(
        "{}",
        formatter
            .format("You have {count, plural, one{# item} other{# items}}", &args)
            .unwrap()
    );

    let mut args = Args::new();
    args.set("gender", "female");
    println!(
        "{}",
        formatter
            .format(
                "{gender, select, male{He} female{She} other{They}} liked this.",
                &args
            )
            .unwrap()
    );

    let mut args = Args::new();
    args.set("amount", 1234.5);
    println!(
        "{}",
        formatter
            .format("Total: {amount, number, ::currency/USD}", &args)
            .unwrap()
    );
    println!(
        "{}",
        formatter
            .format("Ratio: {amount, number, ::.00 group-off sign-always}", &args)
            .unwrap()
    );

    let mut args = Args::new();
    args.set("n", Value::Int(3));
    println!(
        "{}",
        formatter.format("You came {n, ordinal}.", &args).unwrap()
    );

    // Catalog with locale fallback
    let mut catalog = MessageCatalog::new("ru");
    catalog
        .add_message("en", "files", "{n, plural, one{# file} other{# files}}")
        .add_message(
            "ru",
            "files",
            "{n, plural, one{# файл} few{# файла} many{# файлов} other{# файла}}",
        );
    for n in [1, 3, 5] {
        let mut args = Args::new();
        args.set("n", n);
        println!("ru: {}", catalog.localize("files", &args).unwrap());
    }
}
