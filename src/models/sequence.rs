/// 生成 `1..=limit` 的 FizzBuzz 序列
///
/// 同时整除两个除数时输出 `label1` + `label2`，只整除其中一个时输出对应标签，
/// 否则输出十进制数字。除数不能为 0。
pub fn generate(
    divisor1: u64,
    divisor2: u64,
    limit: u64,
    label1: &str,
    label2: &str,
) -> Vec<String> {
    let both = format!("{label1}{label2}");
    (1..=limit)
        .map(|i| match (i % divisor1 == 0, i % divisor2 == 0) {
            (true, true) => both.clone(),
            (true, false) => label1.to_string(),
            (false, true) => label2.to_string(),
            (false, false) => i.to_string(),
        })
        .collect()
}
