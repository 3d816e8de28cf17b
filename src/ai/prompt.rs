/// 收据提取提示词 (面向西班牙语用户, 回复必须只有 JSON 数组)
pub const RECEIPT_PROMPT: &str = r#"
Analiza la imagen del recibo. Extrae cada artículo, su cantidad y su precio total.
- Ignora impuestos, cargos por servicio, propinas y las líneas de suma total.
- Si no se especifica la cantidad, asume que es 1.
- El precio debe ser un número.
- Devuelve los datos como un array JSON de objetos. Cada objeto debe tener las claves: "name" (string), "quantity" (number), y "price" (number).
- Si la imagen no es un recibo o no se puede leer, devuelve un array vacío.
- Tu respuesta completa debe ser únicamente el array JSON, sin ningún otro texto o delimitadores de markdown.
Ejemplo: [{"name": "Hamburguesa", "quantity": 1, "price": 12.50}, {"name": "Patatas Fritas", "quantity": 2, "price": 4.00}]
"#;
