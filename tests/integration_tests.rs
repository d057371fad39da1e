use voml::{
    find, from_str, from_value, parse, table, to_string, to_string_pretty, to_value, DType, Depth,
    Error, Mat, Point, Point3, Size,
};

const DOCUMENT: &str = r#"
[mat_u]
rows = 2
cols = 2
dt = "u"
data = [0, 64, 128, 255]

[mat_c]
rows = 1
cols = 3
dt = "c"
data = [-128, 0, 127]

[mat_w]
rows = 1
cols = 2
dt = "w"
data = [0, 65535]

[mat_s]
rows = 2
cols = 1
dt = "s"
data = [-32768, 32767]

[mat_i]
rows = 2
cols = 3
dt = "i"
data = [1, 2, 3, 4, 5, 6]

[mat_f]
rows = 1
cols = 2
dt = "f"
data = [0.5, -1.0]

[mat_d]
rows = 1
cols = 1
dt = "d"
data = [3.141592653589793]
"#;

#[test]
fn test_decode_int_matrix_row_major() {
    let value = table! {
        "rows" => 2,
        "cols" => 3,
        "dt" => "i",
        "data" => vec![1, 2, 3, 4, 5, 6],
    };
    let mat: Mat = from_value(&value).unwrap();

    assert_eq!(mat.shape(), (2, 3));
    assert_eq!(mat.depth(), Depth::I32);
    assert_eq!(mat.row::<i32>(0).unwrap(), Some(vec![1, 2, 3]));
    assert_eq!(mat.row::<i32>(1).unwrap(), Some(vec![4, 5, 6]));
}

#[test]
fn test_decode_shape_size_mismatch() {
    let value = table! {
        "rows" => 2,
        "cols" => 2,
        "dt" => "f",
        "data" => vec![1, 2, 3],
    };
    assert_eq!(
        from_value::<Mat>(&value),
        Err(Error::ShapeSizeMismatch {
            rows: 2,
            cols: 2,
            len: 3
        })
    );
}

#[test]
fn test_encode_point3_table() {
    let point = Point3::new(1.5f64, -2.0, 0.0);
    let value = to_value(&point).unwrap();

    assert_eq!(
        value,
        table! { "x" => 1.5, "y" => -2.0, "z" => 0.0, "dt" => "d" }
    );
    assert_eq!(from_value::<Point3<f64>>(&value).unwrap(), point);
}

#[test]
fn test_decode_u8_size() {
    let value = table! { "width" => 4, "height" => 4, "dt" => "u" };
    let size: Size<u8> = from_value(&value).unwrap();
    assert_eq!(size, Size::new(4, 4));
}

#[test]
fn test_unknown_tags_rejected() {
    for c in ('a'..='z').chain('A'..='Z').filter(|c| !"ucwsifd".contains(*c)) {
        let tag = c.to_string();
        let value = table! {
            "rows" => 1,
            "cols" => 1,
            "dt" => tag.clone(),
            "data" => vec![1],
        };
        assert_eq!(from_value::<Mat>(&value), Err(Error::UnknownTypeTag(tag)));
    }
}

#[test]
fn test_document_all_tags() {
    let doc = parse(DOCUMENT).unwrap();

    let u: Mat = find(&doc, "mat_u").unwrap();
    assert_eq!(u.to_vec::<u8>().unwrap(), vec![0, 64, 128, 255]);
    let c: Mat = find(&doc, "mat_c").unwrap();
    assert_eq!(c.to_vec::<i8>().unwrap(), vec![-128, 0, 127]);
    let w: Mat = find(&doc, "mat_w").unwrap();
    assert_eq!(w.to_vec::<u16>().unwrap(), vec![0, 65535]);
    let s: Mat = find(&doc, "mat_s").unwrap();
    assert_eq!(s.to_vec::<i16>().unwrap(), vec![-32768, 32767]);
    let i: Mat = find(&doc, "mat_i").unwrap();
    assert_eq!(i.shape(), (2, 3));
    let f: Mat = find(&doc, "mat_f").unwrap();
    assert_eq!(f.to_vec::<f32>().unwrap(), vec![0.5, -1.0]);
    let d: Mat = find(&doc, "mat_d").unwrap();
    assert_eq!(d.at::<f64>(0, 0).unwrap(), Some(std::f64::consts::PI));
}

#[test]
fn test_document_rerender() {
    let doc = parse(DOCUMENT).unwrap();
    let keys = ["mat_u", "mat_c", "mat_w", "mat_s", "mat_i", "mat_f", "mat_d"];

    let mut out = toml::Table::new();
    for key in keys {
        let mat: Mat = find(&doc, key).unwrap();
        out.insert(key.to_string(), to_value(&mat).unwrap());
    }
    let text = toml::to_string(&out).unwrap();
    let reparsed = parse(&text).unwrap();

    for key in keys {
        let before: Mat = find(&doc, key).unwrap();
        let after: Mat = find(&reparsed, key).unwrap();
        assert_eq!(before, after, "{key} changed across a render");
    }
}

#[test]
fn test_element_out_of_range_for_tag() {
    let value = table! {
        "rows" => 1,
        "cols" => 2,
        "dt" => "u",
        "data" => vec![1, 256],
    };
    match from_value::<Mat>(&value) {
        Err(Error::TypeMismatch { field, .. }) => assert_eq!(field, "data[1]"),
        other => panic!("Expected type mismatch, got {other:?}"),
    }
}

#[test]
fn test_float_data_for_int_tag() {
    let value = table! {
        "rows" => 1,
        "cols" => 1,
        "dt" => "i",
        "data" => vec![1.5],
    };
    assert!(matches!(
        from_value::<Mat>(&value),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn test_tag_not_a_string() {
    let value = table! { "x" => 1, "y" => 2, "dt" => 3 };
    match from_value::<Point<i32>>(&value) {
        Err(Error::TypeMismatch {
            field, expected, ..
        }) => {
            assert_eq!(field, "dt");
            assert_eq!(expected, "string");
        }
        other => panic!("Expected type mismatch, got {other:?}"),
    }
}

#[test]
fn test_point_encodes_x_y() {
    let value = to_value(&Point::new(3i16, -4)).unwrap();
    assert_eq!(value, table! { "x" => 3, "y" => -4, "dt" => "s" });
}

#[test]
fn test_unrepresentable_matrix() {
    let mat = Mat::zeros(2, 2, Depth::F16).unwrap();
    assert!(matches!(
        to_value(&mat),
        Err(Error::UnrepresentableType(_))
    ));
    assert!(matches!(
        to_string(&mat),
        Err(Error::UnrepresentableType(_))
    ));
}

#[test]
fn test_decoded_matrix_owns_buffer() {
    let mut value = table! {
        "rows" => 1,
        "cols" => 2,
        "dt" => "w",
        "data" => vec![10, 20],
    };
    let mat: Mat = from_value(&value).unwrap();
    if let Some(table) = value.as_table_mut() {
        table.insert("data".to_string(), toml::Value::from(vec![30, 40]));
    }
    assert_eq!(mat.to_vec::<u16>().unwrap(), vec![10, 20]);
}

#[test]
fn test_pretty_output_parses() {
    let mat = Mat::from_vec(3, 2, vec![1i8, -1, 2, -2, 3, -3]).unwrap();
    let text = to_string_pretty(&mat).unwrap();
    assert!(text.contains("dt = \"c\""));
    let back: Mat = from_str(&text).unwrap();
    assert_eq!(back, mat);
}

#[test]
fn test_tag_for_each_dtype() {
    let tags: String = DType::ALL.iter().map(|d| d.tag()).collect();
    assert_eq!(tags, "ucwsifd");
}
